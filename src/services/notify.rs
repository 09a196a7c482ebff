// src/services/notify.rs

//! Notification dispatch via the CallMeBot WhatsApp API.
//!
//! Transport failures are logged and never raised: a failed send does not
//! undo admission, halt the pipeline, or retry within the run.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::NotifierConfig;
use crate::error::Result;
use crate::models::ConcursoRecord;

const CALLMEBOT_ENDPOINT: &str = "https://api.callmebot.com/whatsapp.php";

/// Dispatches a human-readable message for an admitted record.
///
/// Returns whether the message was delivered; the caller only uses this for
/// the run summary.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, record: &ConcursoRecord) -> bool;
}

/// Format the fixed-structure multi-line message for a record.
///
/// Empty optional fields are omitted.
pub fn format_message(record: &ConcursoRecord) -> String {
    let mut parts = vec![
        format!("NOVO CONCURSO - {}", record.estado),
        String::new(),
        record.titulo.clone(),
    ];

    if record.salario.is_empty() {
        parts.push(format!("{} vagas", record.vagas));
    } else {
        parts.push(format!("{} vagas | Até {}", record.vagas, record.salario));
    }
    parts.push(format!("Nível: {}", record.escolaridade));

    if !record.cargos.is_empty() {
        parts.push(format!("Cargos: {}", record.cargos));
    }
    if !record.prazo_inscricao.is_empty() {
        parts.push(format!("Inscrições: {}", record.prazo_inscricao));
    }
    if !record.url_edital.is_empty() {
        parts.push(format!("Edital: {}", record.url_edital));
    }
    if !record.url.is_empty() {
        parts.push(format!("Detalhes: {}", record.url));
    }

    parts.join("\n")
}

/// WhatsApp notifier over the CallMeBot HTTP API.
pub struct CallMeBotNotifier {
    client: reqwest::Client,
    phone: String,
    apikey: String,
}

impl CallMeBotNotifier {
    /// Create a notifier from resolved transport settings.
    ///
    /// Missing credentials are not an error here: `notify` warns and no-ops,
    /// and the pipeline continues (admission still happens).
    pub fn new(config: &NotifierConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            phone: config.phone.clone(),
            apikey: config.apikey.clone(),
        })
    }

    fn is_configured(&self) -> bool {
        !self.phone.is_empty() && !self.apikey.is_empty()
    }
}

#[async_trait]
impl Notifier for CallMeBotNotifier {
    async fn notify(&self, record: &ConcursoRecord) -> bool {
        if !self.is_configured() {
            log::warn!("CallMeBot credentials not configured, skipping notification");
            return false;
        }

        let message = format_message(record);
        let request = self.client.get(CALLMEBOT_ENDPOINT).query(&[
            ("phone", self.phone.as_str()),
            ("text", message.as_str()),
            ("apikey", self.apikey.as_str()),
        ]);

        match request.send().await {
            Ok(response) if response.status() == reqwest::StatusCode::OK => {
                log::info!("WhatsApp sent: {}", record.titulo);
                true
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                log::error!("CallMeBot error {}: {}", status, body);
                false
            }
            Err(e) => {
                log::error!("CallMeBot request failed: {}", e);
                false
            }
        }
    }
}

/// Notifier for dry runs: logs the message instead of sending it.
pub struct DryRunNotifier;

#[async_trait]
impl Notifier for DryRunNotifier {
    async fn notify(&self, record: &ConcursoRecord) -> bool {
        log::info!("[dry-run] Would send:\n{}", format_message(record));
        true
    }
}
