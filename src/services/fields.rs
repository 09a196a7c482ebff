// src/services/fields.rs

//! Field normalization helpers.
//!
//! Pure functions turning raw markup text fragments into the typed fields of
//! a [`ConcursoRecord`](crate::models::ConcursoRecord). Inputs arrive
//! whitespace-irregular and possibly split across several text nodes.

use std::sync::OnceLock;

use regex::Regex;

/// Collapse any run of whitespace (including newlines) to a single space and
/// strip leading/trailing whitespace.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Join text fragments in document order with single spaces.
///
/// Empty fragments are skipped; the result is whitespace-collapsed. Used for
/// fields split across inline markup, like the application deadline.
pub fn join_fragments<'a>(fragments: impl IntoIterator<Item = &'a str>) -> String {
    let joined = fragments
        .into_iter()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    collapse_whitespace(&joined)
}

fn vagas_salario_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d+)\s*vagas?\s*até\s*(R\$\s*[\d.,]+)").expect("valid vagas pattern")
    })
}

/// Split a combined `<n> vaga(s) até <currency>` string into vacancy count
/// and salary ceiling.
///
/// On a non-match the whole string is kept verbatim as the vacancy field and
/// the salary stays empty. Tolerates optional pluralization of "vaga" and
/// arbitrary spacing around the amount.
pub fn split_vagas_salario(raw: &str) -> (String, String) {
    match vagas_salario_pattern().captures(raw) {
        Some(caps) => {
            let vagas = caps[1].to_string();
            let salario = collapse_whitespace(&caps[2]);
            (vagas, salario)
        }
        None => (raw.to_string(), String::new()),
    }
}

/// Pair the secondary fragments into (cargos, escolaridade).
///
/// Two fragments: first is the role list, second the schooling level. One
/// fragment: the source omitted the role list, so it is the schooling level.
/// None: both empty.
pub fn split_cargos_escolaridade(fragments: &[String]) -> (String, String) {
    match fragments {
        [cargos, escolaridade, ..] => (cargos.clone(), escolaridade.clone()),
        [escolaridade] => (String::new(), escolaridade.clone()),
        [] => (String::new(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b  c "), "a b c");
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace(" \n "), "");
    }

    #[test]
    fn test_join_fragments() {
        assert_eq!(
            join_fragments(["até ", "", " 15/03/2026\n"]),
            "até 15/03/2026"
        );
        assert_eq!(join_fragments([] as [&str; 0]), "");
    }

    #[test]
    fn test_split_vagas_salario_match() {
        let (vagas, salario) = split_vagas_salario("120 vagas até R$ 5.500,00");
        assert_eq!(vagas, "120");
        assert_eq!(salario, "R$ 5.500,00");
    }

    #[test]
    fn test_split_vagas_salario_singular_and_spacing() {
        let (vagas, salario) = split_vagas_salario("1 vaga até R$  1.412,00");
        assert_eq!(vagas, "1");
        assert_eq!(salario, "R$ 1.412,00");
    }

    #[test]
    fn test_split_vagas_salario_no_match() {
        let (vagas, salario) = split_vagas_salario("ampla concorrência");
        assert_eq!(vagas, "ampla concorrência");
        assert_eq!(salario, "");
    }

    #[test]
    fn test_split_cargos_escolaridade_pair() {
        let fragments = vec!["Analista, Técnico".to_string(), "Superior".to_string()];
        let (cargos, escolaridade) = split_cargos_escolaridade(&fragments);
        assert_eq!(cargos, "Analista, Técnico");
        assert_eq!(escolaridade, "Superior");
    }

    #[test]
    fn test_split_cargos_escolaridade_single() {
        let fragments = vec!["Médio".to_string()];
        let (cargos, escolaridade) = split_cargos_escolaridade(&fragments);
        assert_eq!(cargos, "");
        assert_eq!(escolaridade, "Médio");
    }

    #[test]
    fn test_split_cargos_escolaridade_empty() {
        let (cargos, escolaridade) = split_cargos_escolaridade(&[]);
        assert_eq!(cargos, "");
        assert_eq!(escolaridade, "");
    }
}
