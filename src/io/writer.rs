use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::model::{PBXProj, Value};
use crate::Result;

/// Writes [`PBXProj`] tables as property-list documents.
pub struct PBXProjWriter;

impl PBXProjWriter {
    /// Builds the document for `proj`.
    ///
    /// Top-level keys come in the order `archiveVersion`, `classes`, `objectVersion`, `objects`,
    /// `rootObject`, and objects in gid order.
    #[must_use]
    pub fn to_value(proj: &PBXProj) -> plist::Value {
        let mut objects = plist::Dictionary::new();
        for entry in proj.objects() {
            let mut fields = plist::Dictionary::new();
            for (name, value) in entry.fields() {
                fields.insert(name.clone(), convert(value));
            }
            objects.insert(entry.global_id().to_string(), plist::Value::Dictionary(fields));
        }

        let mut document = plist::Dictionary::new();
        document.insert(
            "archiveVersion".to_string(),
            plist::Value::Integer(u64::from(proj.archive_version()).into()),
        );
        document.insert(
            "classes".to_string(),
            plist::Value::Dictionary(plist::Dictionary::new()),
        );
        document.insert(
            "objectVersion".to_string(),
            plist::Value::Integer(u64::from(proj.object_version()).into()),
        );
        document.insert("objects".to_string(), plist::Value::Dictionary(objects));
        document.insert(
            "rootObject".to_string(),
            plist::Value::String(proj.root_object().to_string()),
        );
        plist::Value::Dictionary(document)
    }

    /// Writes `proj` as an XML property list.
    ///
    /// # Errors
    /// Returns [`crate::Error::PropertyList`] if writing fails.
    pub fn write_xml<W: Write>(proj: &PBXProj, writer: W) -> Result<()> {
        Self::to_value(proj).to_writer_xml(writer)?;
        Ok(())
    }

    /// Writes `proj` as an XML property list to the file at `path`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be created, or
    /// [`crate::Error::PropertyList`] if writing fails.
    pub fn to_path(proj: &PBXProj, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        Self::write_xml(proj, &mut writer)?;
        writer.flush()?;
        debug!("Wrote {} objects to {}", proj.objects().len(), path.display());
        Ok(())
    }
}

fn convert(value: &Value) -> plist::Value {
    match value {
        Value::String(text) => plist::Value::String(text.clone()),
        Value::Integer(integer) => plist::Value::Integer((*integer).into()),
        Value::Boolean(flag) => plist::Value::Boolean(*flag),
        Value::Array(values) => plist::Value::Array(values.iter().map(convert).collect()),
        Value::Dictionary(entries) => plist::Value::Dictionary(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), convert(value)))
                .collect(),
        ),
    }
}
