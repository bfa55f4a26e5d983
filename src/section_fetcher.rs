use std::fmt;

use log::debug;

use crate::{config::PortalConfig, error::CheckError, session::PortalSession};

/// Which course listing to ask the portal for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseQuery {
    pub subject: String,
    pub course: String,
    pub term: String,
}

impl CourseQuery {
    pub fn new(
        subject: impl Into<String>,
        course: impl Into<String>,
        term: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            course: course.into(),
            term: term.into(),
        }
    }
}

impl fmt::Display for CourseQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.subject, self.course)
    }
}

/// The class search form's fields, in the order the form submits them.
///
/// Several keys repeat: the search form always sends a `dummy` entry ahead of
/// the real value, and the portal expects both.
pub fn section_query_params(query: &CourseQuery) -> Vec<(&'static str, String)> {
    let pair = |key: &'static str, value: &str| (key, value.to_string());
    vec![
        pair("term_in", &query.term),
        pair("sel_subj", "dummy"),
        pair("sel_subj", &query.subject),
        pair("SEL_CRSE", &query.course),
        pair("SEL_TITLE", ""),
        pair("BEGIN_HH", "0"),
        pair("BEGIN_MI", "0"),
        pair("BEGIN_AP", "a"),
        pair("SEL_DAY", "dummy"),
        pair("SEL_PTRM", "dummy"),
        pair("END_HH", "0"),
        pair("END_MI", "0"),
        pair("END_AP", "a"),
        pair("SEL_CAMP", "dummy"),
        pair("SEL_SCHD", "dummy"),
        pair("SEL_SESS", "dummy"),
        pair("SEL_INSTR", "dummy"),
        pair("SEL_INSTR", "%"),
        pair("SEL_ATTR", "dummy"),
        pair("SEL_ATTR", "%"),
        pair("SEL_LEVL", "dummy"),
        pair("SEL_LEVL", "%"),
        pair("SEL_INSM", "dummy"),
        pair("sel_dunt_code", ""),
        pair("sel_dunt_unit", ""),
        pair("call_value_in", ""),
        pair("rsts", "dummy"),
        pair("crn", "dummy"),
        pair("path", "1"),
        pair("SUB_BTN", "View Sections"),
    ]
}

/// Fetches the raw section listing HTML. The body is not inspected here.
pub async fn fetch_sections(
    session: &PortalSession,
    portal: &PortalConfig,
    query: &CourseQuery,
) -> Result<String, CheckError> {
    let params = section_query_params(query);
    debug!("Fetching sections for {} ({})", query, query.term);
    session
        .request_client()
        .get_body(&portal.sections_url, &params, portal.sections_timeout)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_keep_duplicate_keys_in_order() {
        let query = CourseQuery::new("COMP", "307", "202601");
        let params = section_query_params(&query);

        let subjects: Vec<_> = params
            .iter()
            .filter(|(key, _)| *key == "sel_subj")
            .map(|(_, value)| value.as_str())
            .collect();
        assert_eq!(subjects, vec!["dummy", "COMP"]);

        for key in ["SEL_INSTR", "SEL_ATTR", "SEL_LEVL"] {
            let values: Vec<_> = params
                .iter()
                .filter(|(k, _)| *k == key)
                .map(|(_, value)| value.as_str())
                .collect();
            assert_eq!(values, vec!["dummy", "%"], "{key}");
        }
    }

    #[test]
    fn test_query_params_variable_fields() {
        let query = CourseQuery::new("MATH", "140", "202509");
        let params = section_query_params(&query);
        assert_eq!(params.len(), 30);
        assert_eq!(params[0], ("term_in", "202509".to_string()));
        assert_eq!(params[3], ("SEL_CRSE", "140".to_string()));
        assert_eq!(params[29], ("SUB_BTN", "View Sections".to_string()));
    }

    #[test]
    fn test_course_query_display() {
        let query = CourseQuery::new("COMP", "307", "202601");
        assert_eq!(query.to_string(), "COMP 307");
    }
}
