//! # Contact Module
//!
//! Two ways a visitor can reach the store:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A. WhatsApp composer                 B. Contact form                   │
//! │                                                                         │
//! │  name/phone/message present?          schema check (lengths)            │
//! │     │ yes            │ no                │ ok              │ fail        │
//! │     ▼                ▼                   ▼                 ▼            │
//! │  wa.me deep link   Notification       logged server-   FormState with  │
//! │  (new context)     (no link)          side, success    field errors    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Neither path persists anything.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::types::Product;
use crate::DEFAULT_WHATSAPP_NUMBER;

const WHATSAPP_BASE_URL: &str = "https://wa.me";

// =============================================================================
// Contact Form
// =============================================================================

/// Raw contact input. Missing fields deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, message: impl Into<String>) -> Self {
        ContactForm {
            name: name.into(),
            phone: phone.into(),
            message: message.into(),
        }
    }
}

/// Field name → messages, in a stable order.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Result of a contact form submission as shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormState {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    pub success: bool,
}

impl FormState {
    pub const SUCCESS_MESSAGE: &'static str = "Obrigado pelo seu contato! Responderemos em breve.";
    pub const FAILURE_MESSAGE: &'static str = "Erro na validação do formulário.";

    pub fn accepted() -> Self {
        FormState {
            message: Self::SUCCESS_MESSAGE.to_string(),
            errors: None,
            success: true,
        }
    }

    pub fn rejected(errors: FieldErrors) -> Self {
        FormState {
            message: Self::FAILURE_MESSAGE.to_string(),
            errors: Some(errors),
            success: false,
        }
    }
}

/// A contact submission that passed the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub phone: String,
    pub message: String,
}

/// Schema check for the contact form.
///
/// ## Rules
/// - name: at least 2 characters
/// - phone: at least 10 characters
/// - message: 10 to 500 characters
///
/// Values are trimmed before counting. Every failing field is reported.
pub fn validate_contact_form(form: &ContactForm) -> Result<ContactSubmission, FieldErrors> {
    let name = form.name.trim();
    let phone = form.phone.trim();
    let message = form.message.trim();

    let mut errors = FieldErrors::new();
    let mut fail = |field: &str, msg: &str| {
        errors
            .entry(field.to_string())
            .or_default()
            .push(msg.to_string());
    };

    if name.chars().count() < 2 {
        fail("name", "O nome deve ter pelo menos 2 caracteres.");
    }
    if phone.chars().count() < 10 {
        fail("phone", "Por favor, insira um telefone válido.");
    }
    let message_len = message.chars().count();
    if message_len < 10 {
        fail("message", "A mensagem deve ter pelo menos 10 caracteres.");
    } else if message_len > 500 {
        fail("message", "A mensagem deve ter no máximo 500 caracteres.");
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ContactSubmission {
        name: name.to_string(),
        phone: phone.to_string(),
        message: message.to_string(),
    })
}

// =============================================================================
// WhatsApp Composer
// =============================================================================

/// Where a deep link should be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LinkTarget {
    /// A new browsing context (`_blank`).
    NewContext,
}

/// A messaging deep link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeepLink {
    pub url: String,
    pub target: LinkTarget,
}

/// A transient message for the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

/// What the front end should do after composing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ComposeOutcome {
    Open(DeepLink),
    Notify(Notification),
}

/// Builds pre-filled `wa.me` links for one store number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppComposer {
    number: String,
}

impl Default for WhatsAppComposer {
    fn default() -> Self {
        WhatsAppComposer::new(DEFAULT_WHATSAPP_NUMBER)
    }
}

impl WhatsAppComposer {
    /// `number` is the international number; non-digits are dropped.
    pub fn new(number: &str) -> Self {
        WhatsAppComposer {
            number: number.chars().filter(char::is_ascii_digit).collect(),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// Composes the contact message, or a notification when a field is blank.
    ///
    /// ## Example
    /// ```rust
    /// use emporio_core::contact::{ComposeOutcome, ContactForm, WhatsAppComposer};
    ///
    /// let composer = WhatsAppComposer::new("5581991676177");
    /// let outcome = composer.compose(&ContactForm::new("Ana", "81999999999", "Oi"));
    /// match outcome {
    ///     ComposeOutcome::Open(link) => assert!(link.url.contains("Ana")),
    ///     ComposeOutcome::Notify(_) => unreachable!(),
    /// }
    /// ```
    pub fn compose(&self, form: &ContactForm) -> ComposeOutcome {
        let name = form.name.trim();
        let phone = form.phone.trim();
        let message = form.message.trim();

        if name.is_empty() || phone.is_empty() || message.is_empty() {
            return ComposeOutcome::Notify(Notification {
                title: "Campos obrigatórios".to_string(),
                description: "Por favor, preencha nome, telefone e mensagem.".to_string(),
            });
        }

        let text = format!(
            "Olá! Meu nome é {}.\nTelefone: {}\n\nMensagem: {}",
            name, phone, message
        );
        ComposeOutcome::Open(self.link(&text))
    }

    /// Link asking about one product.
    pub fn product_inquiry(&self, product: &Product) -> DeepLink {
        self.link(&format!(
            "Olá! Gostaria de saber mais sobre o produto: {}",
            product.name
        ))
    }

    /// Link used by the floating WhatsApp button.
    pub fn general_inquiry(&self) -> DeepLink {
        self.link("Olá! Gostaria de saber mais sobre os produtos.")
    }

    fn link(&self, text: &str) -> DeepLink {
        DeepLink {
            url: format!(
                "{}/{}?text={}",
                WHATSAPP_BASE_URL,
                self.number,
                urlencoding::encode(text)
            ),
            target: LinkTarget::NewContext,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_compose_encodes_all_fields() {
        let composer = WhatsAppComposer::new("+55 (81) 99167-6177");
        assert_eq!(composer.number(), "5581991676177");

        let outcome = composer.compose(&ContactForm::new("Ana", "81999999999", "Oi"));
        let link = match outcome {
            ComposeOutcome::Open(link) => link,
            other => panic!("expected link, got {:?}", other),
        };

        assert!(link.url.starts_with("https://wa.me/5581991676177?text="));
        assert!(link.url.contains("Ana"));
        assert!(link.url.contains("81999999999"));
        assert!(link.url.contains("Mensagem%3A%20Oi"));
        assert!(!link.url.contains(' '));
        assert!(!link.url.contains('\n'));
        assert_eq!(link.target, LinkTarget::NewContext);

        let query = link.url.split_once("?text=").unwrap().1;
        let decoded = urlencoding::decode(query).unwrap();
        assert_eq!(
            decoded,
            "Olá! Meu nome é Ana.\nTelefone: 81999999999\n\nMensagem: Oi"
        );
    }

    #[test]
    fn test_compose_blank_field_notifies() {
        let composer = WhatsAppComposer::default();
        for form in [
            ContactForm::new("", "81999999999", "Oi"),
            ContactForm::new("Ana", "  ", "Oi"),
            ContactForm::new("Ana", "81999999999", ""),
        ] {
            assert!(matches!(composer.compose(&form), ComposeOutcome::Notify(_)));
        }
    }

    #[test]
    fn test_outcome_json_is_tagged() {
        let outcome = WhatsAppComposer::default().compose(&ContactForm::default());
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["action"], "notify");
        assert!(json["description"].is_string());
    }

    #[test]
    fn test_product_inquiry() {
        let product = Product {
            id: 1,
            name: "Damasco Turco".to_string(),
            price: Money::from_cents(8990),
            description: None,
            image: None,
            category_id: 1,
            stock_quantity: 0,
            stock_weight: Some(2.0),
            is_bulk: true,
        };
        let link = WhatsAppComposer::default().product_inquiry(&product);
        assert!(link.url.ends_with("Damasco%20Turco"));
    }

    #[test]
    fn test_schema_accepts_valid_form() {
        let form = ContactForm::new(" Ana ", "81999999999", "Quero um orçamento");
        let submission = validate_contact_form(&form).unwrap();
        assert_eq!(submission.name, "Ana");
    }

    #[test]
    fn test_schema_reports_every_field() {
        let errors = validate_contact_form(&ContactForm::new("A", "123", "curta")).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors["name"], vec!["O nome deve ter pelo menos 2 caracteres."]);
        assert_eq!(errors["phone"], vec!["Por favor, insira um telefone válido."]);
        assert_eq!(
            errors["message"],
            vec!["A mensagem deve ter pelo menos 10 caracteres."]
        );

        let state = FormState::rejected(errors);
        assert!(!state.success);
        assert_eq!(state.message, FormState::FAILURE_MESSAGE);
    }

    #[test]
    fn test_schema_message_upper_bound() {
        let long = "x".repeat(501);
        let errors = validate_contact_form(&ContactForm::new("Ana", "81999999999", long)).unwrap_err();
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["message"]);
    }

    #[test]
    fn test_accepted_state_has_no_errors_on_wire() {
        let json = serde_json::to_value(FormState::accepted()).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("errors").is_none());
    }
}
