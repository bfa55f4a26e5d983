use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{section_fetcher::CourseQuery, session::Credentials};

const DEFAULT_PORTAL_BASE_URL: &str = "https://horizon.mcgill.ca/pban1";
const DEFAULT_TERM: &str = "202601";

fn default_portal_base_url() -> String {
    DEFAULT_PORTAL_BASE_URL.to_string()
}

fn default_term() -> String {
    DEFAULT_TERM.to_string()
}

/// The env vars needed for watching courses.
#[derive(Debug, Deserialize)]
pub struct WatchEnv {
    student_id: String,
    password: String,
    courses: String,
    discord_webhook_url: String,
    #[serde(default = "default_term")]
    term: String,
    #[serde(default = "default_portal_base_url")]
    portal_base_url: String,
}

/// Endpoints and timeouts of the registration portal.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub login_form_url: String,
    pub login_url: String,
    pub sections_url: String,
    pub user_agent: String,
    pub login_timeout: Duration,
    pub sections_timeout: Duration,
}

impl PortalConfig {
    pub fn from_base_url(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        Self {
            login_form_url: format!("{base_url}/twbkwbis.P_WWWLogin"),
            login_url: format!("{base_url}/twbkwbis.P_ValLogin"),
            sections_url: format!("{base_url}/bwskfcls.P_GetCrse"),
            user_agent: "Mozilla/5.0".to_string(),
            login_timeout: Duration::from_secs(15),
            sections_timeout: Duration::from_secs(20),
        }
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self::from_base_url(DEFAULT_PORTAL_BASE_URL)
    }
}

pub struct WatchConfig {
    pub credentials: Credentials,
    pub portal: PortalConfig,
    pub courses: Vec<CourseQuery>,
    pub discord_webhook_url: String,
}

impl WatchConfig {
    pub fn new() -> anyhow::Result<Self> {
        let watch_env = WatchEnv::load_from_env()?;
        Self::from_env(watch_env)
    }

    pub fn from_env(watch_env: WatchEnv) -> anyhow::Result<Self> {
        let courses = parse_course_list(&watch_env.courses)
            .context("failed to parse COURSES")?
            .into_iter()
            .map(|(subject, course)| CourseQuery::new(subject, course, &watch_env.term))
            .collect();
        Ok(Self {
            credentials: Credentials::new(watch_env.student_id, watch_env.password),
            portal: PortalConfig::from_base_url(&watch_env.portal_base_url),
            courses,
            discord_webhook_url: watch_env.discord_webhook_url,
        })
    }
}

/// Parses `COMP:307,MATH:140` into `[("COMP", "307"), ("MATH", "140")]`.
pub fn parse_course_list(raw: &str) -> anyhow::Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for chunk in raw.split(',').map(str::trim) {
        if chunk.is_empty() {
            continue;
        }
        let Some((subject, course)) = chunk.split_once(':') else {
            return Err(anyhow::anyhow!(
                "bad course spec '{}', expected SUBJECT:NUMBER",
                chunk
            ));
        };
        let (subject, course) = (subject.trim(), course.trim());
        if subject.is_empty() || course.is_empty() {
            return Err(anyhow::anyhow!(
                "bad course spec '{}', expected SUBJECT:NUMBER",
                chunk
            ));
        }
        pairs.push((subject.to_string(), course.to_string()));
    }
    Ok(pairs)
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_course_list() {
        let courses = parse_course_list(" COMP:307, MATH : 140 ,,").unwrap();
        assert_eq!(
            courses,
            vec![
                ("COMP".to_string(), "307".to_string()),
                ("MATH".to_string(), "140".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_course_list_empty() {
        assert!(parse_course_list("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_course_list_missing_colon() {
        let err = parse_course_list("COMP:307,MATH140").unwrap_err();
        assert!(err.to_string().contains("MATH140"));
    }

    #[test]
    fn test_parse_course_list_empty_side() {
        assert!(parse_course_list("COMP:").is_err());
        assert!(parse_course_list(":307").is_err());
    }

    #[test]
    fn test_portal_config_from_base_url() {
        let portal = PortalConfig::from_base_url("http://localhost:8080/pban1/");
        assert_eq!(
            portal.login_form_url,
            "http://localhost:8080/pban1/twbkwbis.P_WWWLogin"
        );
        assert_eq!(portal.login_url, "http://localhost:8080/pban1/twbkwbis.P_ValLogin");
        assert_eq!(
            portal.sections_url,
            "http://localhost:8080/pban1/bwskfcls.P_GetCrse"
        );
    }

    #[test]
    fn test_watch_config_builds_queries_with_term() {
        let watch_env = WatchEnv {
            student_id: "260000000".to_string(),
            password: "hunter2".to_string(),
            courses: "COMP:307".to_string(),
            discord_webhook_url: "http://localhost/webhook".to_string(),
            term: "202509".to_string(),
            portal_base_url: default_portal_base_url(),
        };
        let config = WatchConfig::from_env(watch_env).unwrap();
        assert_eq!(config.courses, vec![CourseQuery::new("COMP", "307", "202509")]);
        assert_eq!(
            config.portal.sections_url,
            "https://horizon.mcgill.ca/pban1/bwskfcls.P_GetCrse"
        );
    }
}
