use thiserror::Error;

use crate::coding::{CodingKey, ObjectKind};

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! malformed_value {
    // Single string version
    ($field:expr, $msg:expr) => {
        crate::Error::MalformedValue {
            field: $field.to_string(),
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($field:expr, $fmt:expr, $($arg:tt)*) => {
        crate::Error::MalformedValue {
            field: $field.to_string(),
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every failure surfaces synchronously to the caller of the field access, encode call or typed
/// cast that triggered it. There is no retry and no partially decoded object is ever handed out:
/// a field either decodes fully or the access fails.
///
/// # Error Categories
///
/// ## Programming Errors
/// - [`Error::MissingCoder`] - A field was accessed that has no registered coder
/// - [`Error::KindMismatch`] - An object was viewed as a kind it is not
/// - [`Error::GidConflict`] - Two distinct objects claimed the same gid during one encode
///
/// ## Data Errors
/// - [`Error::MalformedValue`] - A raw field value has a shape its coder cannot interpret
/// - [`Error::DanglingReference`] - A by-ref field names a gid that is not in the table
/// - [`Error::MissingField`] - A required field is absent
/// - [`Error::Malformed`] - The project document itself is structurally broken
///
/// ## I/O and External Errors
/// - [`Error::PropertyList`] - Errors from the property-list collaborator
/// - [`Error::FileError`] - Filesystem I/O errors
///
/// # Examples
///
/// ```rust,no_run
/// use pbxcodec::{Error, PBXObjectUnarchiver, PBXProjReader};
///
/// let proj = PBXProjReader::from_path("App.xcodeproj/project.pbxproj")?;
/// let project = PBXObjectUnarchiver::new().decode(&proj)?;
///
/// match project.targets() {
///     Ok(targets) => println!("{} targets", targets.len()),
///     Err(Error::DanglingReference { gid, field }) => {
///         eprintln!("{field} points at missing object {gid}");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// # Ok::<(), pbxcodec::Error>(())
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A field was accessed or encoded through a [`CodingKey`] that has no coder bound to it.
    ///
    /// The coder registry is a static table built once per process; coders are never synthesized
    /// at runtime, so hitting this means the calling code names a field its kind does not declare.
    #[error("No coder registered for '{0}'")]
    MissingCoder(CodingKey),

    /// A coder received a raw value it cannot interpret.
    ///
    /// Only the access of the affected field fails. Sibling fields that were already decoded
    /// remain valid and cached.
    ///
    /// # Fields
    ///
    /// * `field` - The field whose value was rejected
    /// * `message` - What was wrong with the value
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed value for '{field}' - {file}:{line}: {message}")]
    MalformedValue {
        /// The field whose value was rejected
        field: String,
        /// The message to be printed for the MalformedValue error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A by-ref field holds a gid that is absent from the objects table.
    #[error("'{field}' references object '{gid}' which is not present in the objects table")]
    DanglingReference {
        /// The gid that could not be resolved
        gid: String,
        /// The field holding the reference
        field: String,
    },

    /// An object was requested as a kind it is not.
    ///
    /// Raised by typed casts, by by-ref fields whose referent has an unexpected `isa`, and by
    /// inline version requirements with an unknown `kind`.
    #[error(
        "Object of kind '{found}' is not supported here. Supported kinds are: {}",
        join_kinds(.expected)
    )]
    KindMismatch {
        /// The kind (or raw discriminant) that was found
        found: String,
        /// The kinds that would have been accepted
        expected: Vec<ObjectKind>,
    },

    /// A required field is absent, either while building a fresh object or while reading a
    /// field that the typed view declares as mandatory.
    #[error("'{field}' must not be absent on {kind}")]
    MissingField {
        /// The kind owning the field
        kind: ObjectKind,
        /// The field name
        field: &'static str,
    },

    /// An explicit gid carried by a decoded object was already issued to a different object in
    /// the same encode run.
    ///
    /// Raised when the generator issued the gid to a fresh object, which seeding the archiver from
    /// the table being rewritten (see [`crate::PBXObjectArchiver::for_rewrite`]) avoids. Also
    /// raised when two modified copies of one decoded object meet in the same graph.
    #[error("Global identifier '{0}' was already issued to another object")]
    GidConflict(String),

    /// The project document is damaged and could not be read.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Error raised by the property-list reader or writer.
    #[error("{0}")]
    PropertyList(#[from] plist::Error),

    /// File I/O error.
    #[error("{0}")]
    FileError(#[from] std::io::Error),
}

fn join_kinds(kinds: &[ObjectKind]) -> String {
    kinds
        .iter()
        .map(ObjectKind::discriminant)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mismatch_lists_alternatives() {
        let error = Error::KindMismatch {
            found: "PBXGroup".to_string(),
            expected: vec![ObjectKind::PBXNativeTarget, ObjectKind::PBXAggregateTarget],
        };

        assert_eq!(
            error.to_string(),
            "Object of kind 'PBXGroup' is not supported here. Supported kinds are: PBXNativeTarget, PBXAggregateTarget"
        );
    }

    #[test]
    fn test_malformed_value_macro() {
        let error = malformed_value!(
            "PBXLegacyTarget.passBuildSettingsInEnvironment",
            "got '{}'",
            "maybe"
        );
        match error {
            Error::MalformedValue { field, message, .. } => {
                assert_eq!(field, "PBXLegacyTarget.passBuildSettingsInEnvironment");
                assert_eq!(message, "got 'maybe'");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
