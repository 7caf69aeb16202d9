use crate::bookmark::BookmarkDraft;
use crate::tag::normalize_tag;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Display;
use url::Url;

pub const URL_MAX_LENGTH: usize = 2000;
pub const TITLE_MAX_LENGTH: usize = 200;
pub const DESCRIPTION_MAX_LENGTH: usize = 500;
pub const MAX_TAGS: usize = 5;

/// Field key used for errors that are not tied to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

const ALLOWED_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_A_STRING: &str = "Not a valid string.";
const BLANK: &str = "This field may not be blank.";
const INVALID_URL: &str = "Enter a valid URL.";

/// Field-level validation failures, keyed by field name.
///
/// Serializes as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// A candidate bookmark payload as received from a client.
///
/// Each field holds the raw JSON value, if the key was present at all, so
/// that type mismatches are reported per field instead of failing the whole
/// body. `Some(Value::Null)` is an explicit `null`. Keys other than these four
/// (`id` and `created_at` included) are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkInput {
    pub url: Option<Value>,
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub tags: Option<Value>,
}

impl BookmarkInput {
    /// Checks every field and returns the normalized draft, or all the field
    /// errors found.
    ///
    /// The same rules apply to creation and to full replacement on update.
    pub fn validate(self) -> Result<BookmarkDraft, FieldErrors> {
        let mut errors = FieldErrors::default();

        let url = collect(&mut errors, "url", validate_url(self.url));
        let title = collect(&mut errors, "title", validate_title(self.title));
        let description = collect(
            &mut errors,
            "description",
            validate_description(self.description),
        );
        let tags = collect(&mut errors, "tags", validate_tags(self.tags));

        match (url, title, description, tags) {
            (Some(url), Some(title), Some(description), Some(tags)) => Ok(BookmarkDraft {
                url,
                title,
                description,
                tags,
            }),
            _ => Err(errors),
        }
    }
}

impl TryFrom<Value> for BookmarkInput {
    type Error = FieldErrors;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(mut map) => Ok(Self {
                url: map.remove("url"),
                title: map.remove("title"),
                description: map.remove("description"),
                tags: map.remove("tags"),
            }),
            other => Err(FieldErrors::single(
                NON_FIELD_ERRORS,
                format!(
                    "Invalid data. Expected an object, but got {}.",
                    kind_of(&other)
                ),
            )),
        }
    }
}

fn collect<T>(
    errors: &mut FieldErrors,
    field: &'static str,
    result: Result<T, String>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.add(field, message);
            None
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

fn required_text(value: Option<Value>) -> Result<String, String> {
    match value {
        None => Err(REQUIRED.to_string()),
        Some(Value::Null) => Err(NOT_NULL.to_string()),
        Some(Value::String(text)) => Ok(text),
        Some(_) => Err(NOT_A_STRING.to_string()),
    }
}

fn optional_text(value: Option<Value>) -> Result<Option<String>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(_) => Err(NOT_A_STRING.to_string()),
    }
}

fn validate_url(value: Option<Value>) -> Result<String, String> {
    let raw = required_text(value)?;
    let url = raw.trim();

    if url.is_empty() {
        return Err(BLANK.to_string());
    }
    if url.chars().count() > URL_MAX_LENGTH {
        return Err(format!(
            "Ensure this field has no more than {URL_MAX_LENGTH} characters."
        ));
    }

    // The parser silently repairs these; stored text must be what was checked.
    if url
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || c == '\\')
    {
        return Err(INVALID_URL.to_string());
    }

    let parsed = Url::parse(url).map_err(|_| INVALID_URL.to_string())?;
    let has_host = parsed.host_str().is_some_and(|host| !host.is_empty());
    let has_authority = url
        .get(parsed.scheme().len()..)
        .is_some_and(|rest| rest.starts_with("://"));
    if !has_host || !has_authority || !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(INVALID_URL.to_string());
    }

    Ok(url.to_owned())
}

fn validate_title(value: Option<Value>) -> Result<String, String> {
    let raw = required_text(value)?;
    let title = raw.trim();

    if title.is_empty() {
        return Err("Title is required.".to_string());
    }
    if title.chars().count() > TITLE_MAX_LENGTH {
        return Err(format!(
            "Title must be at most {TITLE_MAX_LENGTH} characters."
        ));
    }

    Ok(title.to_owned())
}

fn validate_description(value: Option<Value>) -> Result<String, String> {
    let Some(raw) = optional_text(value)? else {
        return Ok(String::new());
    };
    let description = raw.trim();

    if description.chars().count() > DESCRIPTION_MAX_LENGTH {
        return Err(format!(
            "Description must be at most {DESCRIPTION_MAX_LENGTH} characters."
        ));
    }

    Ok(description.to_owned())
}

fn validate_tags(value: Option<Value>) -> Result<Vec<String>, String> {
    let items = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err("Tags must be an array of strings.".to_string()),
    };

    if items.len() > MAX_TAGS {
        return Err(format!("Maximum {MAX_TAGS} tags allowed."));
    }

    items
        .iter()
        .map(|item| match item {
            Value::String(tag) => Ok(normalize_tag(tag)),
            _ => Err("Each tag must be a string.".to_string()),
        })
        .collect()
}
