use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use log::{debug, trace};

use crate::config::CodecConfig;
use crate::model::{Dictionary, PBXObjectReference, PBXObjects, PBXProj, Value};
use crate::Result;

/// Reads [`PBXProj`] tables from property-list documents.
pub struct PBXProjReader;

impl PBXProjReader {
    /// Reads the document at `path`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened,
    /// [`crate::Error::PropertyList`] if it is not a property list, or [`crate::Error::Malformed`]
    /// if it is not a project document.
    pub fn from_path(path: impl AsRef<Path>) -> Result<PBXProj> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Reads a document from `reader`.
    ///
    /// # Errors
    /// Returns [`crate::Error::PropertyList`] if the input is not a property list, or
    /// [`crate::Error::Malformed`] if it is not a project document.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<PBXProj> {
        let value = plist::Value::from_reader(reader)?;
        Self::from_value(&value)
    }

    /// Converts an already parsed document.
    ///
    /// `objects` and `rootObject` are required. The header versions may be integers or numeric
    /// strings and default to the [`CodecConfig`] defaults. Any other top-level key is ignored.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if a required key is missing, a value has the wrong
    /// shape, or the document uses a value kind project files never contain.
    pub fn from_value(value: &plist::Value) -> Result<PBXProj> {
        let document = value
            .as_dictionary()
            .ok_or_else(|| malformed_error!("Project document is not a dictionary"))?;
        let defaults = CodecConfig::default();

        let mut archive_version = defaults.archive_version;
        let mut object_version = defaults.object_version;
        let mut objects = None;
        let mut root_object = None;

        for (key, value) in document {
            match key.as_str() {
                "archiveVersion" => archive_version = version(key, value)?,
                "objectVersion" => object_version = version(key, value)?,
                "objects" => objects = Some(read_objects(value)?),
                "rootObject" => {
                    let gid = value
                        .as_string()
                        .ok_or_else(|| malformed_error!("'rootObject' is not a string"))?;
                    root_object = Some(gid.to_string());
                }
                other => trace!("Skipping top-level key {}", other),
            }
        }

        let objects = objects.ok_or_else(|| malformed_error!("Missing 'objects' table"))?;
        let root_object = root_object.ok_or_else(|| malformed_error!("Missing 'rootObject'"))?;
        debug!("Read {} objects with root {}", objects.len(), root_object);

        Ok(PBXProj::new(root_object, objects).versions(archive_version, object_version))
    }
}

fn version(key: &str, value: &plist::Value) -> Result<u32> {
    let parsed = match value {
        plist::Value::Integer(integer) => integer.as_unsigned().and_then(|v| u32::try_from(v).ok()),
        plist::Value::String(text) => text.trim().parse::<u32>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| malformed_error!("'{}' is not a version number", key))
}

fn read_objects(value: &plist::Value) -> Result<PBXObjects> {
    let table = value
        .as_dictionary()
        .ok_or_else(|| malformed_error!("'objects' is not a dictionary"))?;

    let mut builder = PBXObjects::builder();
    for (gid, entry) in table {
        let Value::Dictionary(fields) = convert(entry, gid)? else {
            return Err(malformed_error!("Object {} is not a dictionary", gid));
        };
        builder.add(PBXObjectReference::new(gid.clone(), fields));
    }
    Ok(builder.build())
}

/// Converts one property-list value. `path` locates the value in error messages.
fn convert(value: &plist::Value, path: &str) -> Result<Value> {
    Ok(match value {
        plist::Value::String(text) => Value::String(text.clone()),
        plist::Value::Integer(integer) => Value::Integer(
            integer
                .as_signed()
                .ok_or_else(|| {
                    malformed_error!("{}: integer {:?} is out of range", path, integer)
                })?,
        ),
        plist::Value::Boolean(flag) => Value::Boolean(*flag),
        plist::Value::Array(values) => Value::Array(
            values
                .iter()
                .enumerate()
                .map(|(index, value)| convert(value, &format!("{path}[{index}]")))
                .collect::<Result<Vec<_>>>()?,
        ),
        plist::Value::Dictionary(entries) => {
            let mut map = Dictionary::new();
            for (key, value) in entries {
                map.insert(key.clone(), convert(value, &format!("{path}.{key}"))?);
            }
            Value::Dictionary(map)
        }
        _ => {
            return Err(malformed_error!(
                "{}: property list value kind is not used by project files",
                path
            ))
        }
    })
}
