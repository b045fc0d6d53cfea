use thiserror::Error;

const IMAGE_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/gif"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentTypeGroup {
    Image,
}

impl ContentTypeGroup {
    pub fn content_types(self) -> &'static [&'static str] {
        match self {
            ContentTypeGroup::Image => IMAGE_CONTENT_TYPES,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Content-Type should be one of the following: {}", allowed.join(","))]
pub struct ContentTypeError {
    pub allowed: Vec<String>,
    pub actual: String,
}

/// Allow-list check for the declared content type of an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeValidator {
    allowed: Vec<String>,
}

impl ContentTypeValidator {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn for_group(group: ContentTypeGroup) -> Self {
        Self::new(group.content_types().iter().copied())
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    /// No declared content type means there is nothing to check.
    pub fn validate(&self, content_type: Option<&str>) -> Result<(), ContentTypeError> {
        let Some(actual) = content_type else {
            return Ok(());
        };

        if self.allowed.iter().any(|allowed| allowed == actual) {
            Ok(())
        } else {
            Err(ContentTypeError {
                allowed: self.allowed.clone(),
                actual: actual.to_string(),
            })
        }
    }
}

impl From<ContentTypeGroup> for ContentTypeValidator {
    fn from(group: ContentTypeGroup) -> Self {
        Self::for_group(group)
    }
}
