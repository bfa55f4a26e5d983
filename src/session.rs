use std::fmt;

use log::{debug, info};

use crate::{config::PortalConfig, error::CheckError, requests::RequestClient};

/// Present in the login response only when the portal forwards to its main menu.
pub const LOGIN_SUCCESS_MARKER: &str = "twbkwbis.P_GenMenu?name=bmenu.P_MainMnu";

/// Student id and PIN used to sign in.
#[derive(Clone)]
pub struct Credentials {
    id: String,
    secret: String,
}

impl Credentials {
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// An authenticated connection to the portal.
///
/// Owns the cookie jar the portal hands out at login, so it is not `Clone`:
/// one check flow holds it at a time.
#[derive(Debug)]
pub struct PortalSession {
    request_client: RequestClient,
}

impl PortalSession {
    pub(crate) fn request_client(&self) -> &RequestClient {
        &self.request_client
    }
}

/// Signs in and returns a session whose cookies grant access to the section pages.
///
/// The portal answers 200 whether or not the credentials are accepted, so
/// success is judged only by the redirect to the main menu in the body.
pub async fn authenticate(
    portal: &PortalConfig,
    credentials: &Credentials,
) -> Result<PortalSession, CheckError> {
    let request_client = RequestClient::new(&portal.user_agent)?;

    // Only the cookies matter here.
    request_client
        .get(&portal.login_form_url, &[], portal.login_timeout)
        .await?;
    debug!("Fetched login form from {}", portal.login_form_url);

    let form = [
        ("sid", credentials.id.as_str()),
        ("PIN", credentials.secret.as_str()),
    ];
    let body = request_client
        .post_form_body(&portal.login_url, &form, portal.login_timeout)
        .await?;

    if !body.contains(LOGIN_SUCCESS_MARKER) {
        return Err(CheckError::Authentication(
            "login failed, portal did not redirect to the main menu".to_string(),
        ));
    }

    info!("Logged in as {}", credentials.id);
    Ok(PortalSession { request_client })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_hides_secret() {
        let credentials = Credentials::new("260000000", "hunter2");
        let debugged = format!("{:?}", credentials);
        assert!(debugged.contains("260000000"));
        assert!(!debugged.contains("hunter2"));
    }
}
