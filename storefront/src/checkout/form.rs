//! Checkout form fields

use shared::models::{CustomerInfo, ShippingInfo, User};

pub const DEFAULT_REGION: &str = "Región Metropolitana de Santiago";
pub const DEFAULT_COMUNA: &str = "Cerrillos";

/// Customer and shipping data entered at checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub street: String,
    pub department: Option<String>,
    pub region: String,
    pub comuna: String,
    pub indications: Option<String>,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            street: String::new(),
            department: None,
            region: DEFAULT_REGION.to_string(),
            comuna: DEFAULT_COMUNA.to_string(),
            indications: None,
        }
    }
}

impl CheckoutForm {
    /// Fill empty customer fields from the logged-in user
    pub fn prefill_from(&mut self, user: &User) {
        if self.first_name.trim().is_empty() {
            self.first_name = user.first_name.clone();
        }
        if self.last_name.trim().is_empty() {
            self.last_name = user.last_name.clone();
        }
        if self.email.trim().is_empty() {
            self.email = user.email.clone();
        }
    }

    /// Names of required fields left blank, in form order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("street", &self.street),
            ("region", &self.region),
            ("comuna", &self.comuna),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn customer(&self) -> CustomerInfo {
        CustomerInfo {
            email: self.email.trim().to_string(),
            name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        }
    }

    pub fn shipping(&self) -> ShippingInfo {
        ShippingInfo {
            street: self.street.trim().to_string(),
            department: non_blank(&self.department),
            region: self.region.trim().to_string(),
            comuna: self.comuna.trim().to_string(),
            indications: non_blank(&self.indications),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::EntityId;
    use shared::models::Role;

    fn filled() -> CheckoutForm {
        CheckoutForm {
            first_name: "Ana".into(),
            last_name: "Rojas".into(),
            email: "ana@example.cl".into(),
            street: "Av. Siempre Viva 742".into(),
            department: Some("  ".into()),
            indications: Some(" Dejar en conserjería ".into()),
            ..CheckoutForm::default()
        }
    }

    #[test]
    fn test_defaults_fill_region_and_comuna() {
        let form = CheckoutForm::default();
        assert_eq!(form.region, DEFAULT_REGION);
        assert_eq!(form.comuna, DEFAULT_COMUNA);
        assert_eq!(form.missing_fields(), ["firstName", "lastName", "email", "street"]);
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut form = filled();
        form.street = "   ".into();
        assert_eq!(form.missing_fields(), ["street"]);
        assert!(!form.is_complete());
    }

    #[test]
    fn test_shipping_trims_optionals() {
        let shipping = filled().shipping();
        assert_eq!(shipping.department, None);
        assert_eq!(shipping.indications.as_deref(), Some("Dejar en conserjería"));
    }

    #[test]
    fn test_prefill_keeps_typed_values() {
        let user = User {
            id: EntityId::from(7),
            first_name: "Ana".into(),
            last_name: "Rojas".into(),
            email: "ana@example.cl".into(),
            role: Role::Client,
            phone: None,
        };
        let mut form = CheckoutForm {
            email: "otra@example.cl".into(),
            ..CheckoutForm::default()
        };
        form.prefill_from(&user);
        assert_eq!(form.first_name, "Ana");
        assert_eq!(form.email, "otra@example.cl");
        assert_eq!(form.customer().last_name, "Rojas");
    }
}
