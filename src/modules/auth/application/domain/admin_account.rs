/// The single account allowed to edit the portfolio.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    email: String,
    password_hash: String,
}

impl AdminAccount {
    /// `email` is compared case-insensitively; `password_hash` is an Argon2 PHC string.
    pub fn new(email: &str, password_hash: String) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            password_hash,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn matches_email(&self, candidate: &str) -> bool {
        self.email == candidate.trim().to_lowercase()
    }
}
