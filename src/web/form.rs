//! `application/x-www-form-urlencoded` decoding for the action routes.

/// Decoded form fields in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    fields: Vec<(String, String)>,
}

impl Form {
    pub fn parse(body: &str) -> Self {
        let fields = body
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(name), decode_component(value))
            })
            .collect();
        Self { fields }
    }

    /// First value for `name`; missing fields read as empty.
    pub fn get(&self, name: &str) -> &str {
        self.field(name).unwrap_or("")
    }

    /// First value for `name`, or `None` when the field was not posted.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Decode one component: `+` is a space, `%XX` a byte, CRLF becomes LF.
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    let decoded = match urlencoding::decode(&spaced) {
        Ok(s) => s.into_owned(),
        Err(_) => spaced.clone(),
    };
    decoded.replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fields() {
        let form = Form::parse("env=prod&key=db_url&value=");
        assert_eq!(form.get("env"), "prod");
        assert_eq!(form.get("key"), "db_url");
        assert_eq!(form.get("value"), "");
        assert_eq!(form.get("missing"), "");
    }

    #[test]
    fn decodes_plus_and_percent() {
        let form = Form::parse("value=a+b%2Bc%20d&key=%C3%A9t%C3%A9");
        assert_eq!(form.get("value"), "a b+c d");
        assert_eq!(form.get("key"), "été");
    }

    #[test]
    fn normalizes_textarea_newlines() {
        let form = Form::parse("value=line1%0D%0Aline2");
        assert_eq!(form.get("value"), "line1\nline2");
    }

    #[test]
    fn invalid_utf8_is_kept_raw() {
        let form = Form::parse("value=%FF");
        assert_eq!(form.get("value"), "%FF");
    }

    #[test]
    fn first_value_wins() {
        let form = Form::parse("target=a&target=b&flag");
        assert_eq!(form.get("target"), "a");
        assert_eq!(form.get("flag"), "");
    }

    #[test]
    fn field_distinguishes_missing_from_empty() {
        let form = Form::parse("value=&answer=yes");
        assert_eq!(form.field("value"), Some(""));
        assert_eq!(form.field("env"), None);
        assert_eq!(form.get("env"), "");
    }
}
