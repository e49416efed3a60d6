use super::super::domain::{UploadedFile, ValidationResult};

pub const MIB: u64 = 1024 * 1024;

/// Size and type constraints for an upload input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRule {
    pub max_bytes: u64,
    /// Lower-case extensions without the dot.
    pub extensions: &'static [&'static str],
    pub format_message: &'static str,
    /// Inspect every attached file instead of only the first.
    pub inspect_each: bool,
}

impl FileRule {
    /// Size is checked before type; the first failure wins.
    pub fn check(&self, file: &UploadedFile) -> Result<(), String> {
        if file.size > self.max_bytes {
            return Err(self.size_message());
        }

        if !self.accepts_name(&file.name) {
            return Err(self.format_message.to_string());
        }

        Ok(())
    }

    pub fn accepts_name(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.extensions.iter().any(|extension| {
            name.strip_suffix(*extension)
                .map(|stem| stem.ends_with('.'))
                .unwrap_or(false)
        })
    }

    pub fn size_message(&self) -> String {
        format!("File size must be less than {}MB", self.max_bytes / MIB)
    }
}

pub(crate) fn check_uploads(
    rule: &FileRule,
    files: &[UploadedFile],
    required: bool,
    required_message: &str,
) -> ValidationResult {
    let Some(first) = files.first() else {
        return if required {
            ValidationResult::invalid(required_message)
        } else {
            ValidationResult::valid()
        };
    };

    let inspected = if rule.inspect_each {
        files
    } else {
        std::slice::from_ref(first)
    };

    for file in inspected {
        if let Err(message) = rule.check(file) {
            return ValidationResult::invalid(message);
        }
    }

    ValidationResult::valid()
}
