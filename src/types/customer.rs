use serde::{Deserialize, Serialize};

use super::{QBCreatable, QBToRef};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Customer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_email_addr: Option<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Email {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl QBCreatable for Customer {
    fn can_create(&self) -> bool {
        self.display_name.is_some() || self.company_name.is_some()
    }
}

impl QBToRef for Customer {
    fn ref_name(&self) -> Option<&String> {
        self.display_name.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_wire_format() {
        let customer = Customer {
            display_name: Some("aB3dE9".into()),
            company_name: Some("ABC Corporations".into()),
            primary_email_addr: Some(Email {
                address: Some("testconceptsample@mailinator.com".into()),
            }),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&customer).unwrap(),
            serde_json::json!({
                "DisplayName": "aB3dE9",
                "CompanyName": "ABC Corporations",
                "PrimaryEmailAddr": { "Address": "testconceptsample@mailinator.com" }
            })
        );
        assert!(customer.can_create());
    }
}
