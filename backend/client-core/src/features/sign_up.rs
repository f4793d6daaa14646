use crate::error::feature::FeatureError;
use crate::gateway::HttpGateway;

use models::NewMember;

use log::info;

const MEMBERS_ENDPOINT: &str = "/members";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpForm {
    pub email: String,
    pub name: String,
    pub age: u32,
    pub password: String,
    pub password_confirm: String,
}

pub struct SignUp {
    gateway: HttpGateway,
}

impl SignUp {
    pub fn new(gateway: HttpGateway) -> Self {
        Self { gateway }
    }

    pub async fn register(&self, form: &SignUpForm) -> Result<(), FeatureError> {
        if form.email.trim().is_empty() || form.name.trim().is_empty() || form.password.is_empty()
        {
            return Err(FeatureError::validation("Please fill in every field"));
        }
        if form.password != form.password_confirm {
            return Err(FeatureError::validation("Passwords do not match"));
        }

        let member = NewMember {
            email: form.email.trim().to_string(),
            name: form.name.trim().to_string(),
            age: form.age,
            password: form.password.clone(),
        };
        self.gateway.post_unit(MEMBERS_ENDPOINT, &member, None).await?;

        info!("Registered member {}", member.email);
        Ok(())
    }
}
