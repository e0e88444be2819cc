use std::io::Cursor;
use std::path::PathBuf;

use pbxcodec::prelude::*;

const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>archiveVersion</key>
	<string>1</string>
	<key>classes</key>
	<dict/>
	<key>objectVersion</key>
	<string>56</string>
	<key>objects</key>
	<dict>
		<key>0A0000000000000000000001</key>
		<dict>
			<key>isa</key>
			<string>PBXProject</string>
			<key>mainGroup</key>
			<string>0A0000000000000000000002</string>
			<key>targets</key>
			<array>
				<string>0A0000000000000000000003</string>
			</array>
			<key>hasScannedForEncodings</key>
			<string>0</string>
			<key>knownRegions</key>
			<array>
				<string>en</string>
			</array>
		</dict>
		<key>0A0000000000000000000002</key>
		<dict>
			<key>isa</key>
			<string>PBXGroup</string>
			<key>children</key>
			<array>
				<string>0A0000000000000000000004</string>
			</array>
			<key>sourceTree</key>
			<string>&lt;group&gt;</string>
		</dict>
		<key>0A0000000000000000000003</key>
		<dict>
			<key>isa</key>
			<string>PBXLegacyTarget</string>
			<key>name</key>
			<string>Make</string>
			<key>buildToolPath</key>
			<string>/usr/bin/make</string>
			<key>passBuildSettingsInEnvironment</key>
			<string>1</string>
			<key>buildPhases</key>
			<array/>
			<key>dependencies</key>
			<array/>
		</dict>
		<key>0A0000000000000000000004</key>
		<dict>
			<key>isa</key>
			<string>PBXFileReference</string>
			<key>path</key>
			<string>Makefile</string>
			<key>sourceTree</key>
			<string>SOURCE_ROOT</string>
			<key>lastKnownFileType</key>
			<string>sourcecode.make</string>
		</dict>
	</dict>
	<key>rootObject</key>
	<string>0A0000000000000000000001</string>
</dict>
</plist>
"#;

fn read() -> Result<PBXProj> {
    PBXProjReader::from_reader(Cursor::new(DOCUMENT.as_bytes()))
}

#[test]
fn test_read_xml_document() -> Result<()> {
    let proj = read()?;
    assert_eq!(proj.archive_version(), 1);
    assert_eq!(proj.object_version(), 56);
    assert_eq!(proj.objects().len(), 4);

    let project = PBXObjectUnarchiver::new().decode(&proj)?;
    assert_eq!(project.known_regions()?, vec!["en".to_string()]);

    let targets = project.targets()?;
    let PBXTarget::Legacy(make) = &targets[0] else {
        panic!("unexpected target {:?}", targets[0]);
    };
    assert_eq!(make.name()?, "Make");
    assert_eq!(make.build_tool_path()?.as_deref(), Some("/usr/bin/make"));
    assert_eq!(make.pass_build_settings_in_environment()?, Some(true));

    let children = project.main_group()?.children()?;
    let GroupChild::FileReference(makefile) = &children[0] else {
        panic!("unexpected child {:?}", children[0]);
    };
    assert_eq!(makefile.source_tree()?, Some(PBXSourceTree::SourceRoot));
    assert_eq!(makefile.last_known_file_type()?.as_deref(), Some("sourcecode.make"));
    Ok(())
}

#[test]
fn test_rewrite_keeps_header_and_gids() -> Result<()> {
    let proj = read()?;
    let project = PBXObjectUnarchiver::new().decode(&proj)?;
    let rewritten = PBXObjectArchiver::for_rewrite(&proj).encode(&project)?;

    assert_eq!(rewritten.object_version(), 56);
    assert_eq!(rewritten, proj);
    Ok(())
}

#[test]
fn test_write_and_read_file() -> Result<()> {
    let project = PBXProject::builder()
        .file(PBXFileReference::builder().path("main.swift").build()?)
        .target(PBXNativeTarget::builder().name("Tool").build()?)
        .build()?;
    let proj = PBXObjectArchiver::new().encode(&project)?;

    let path: PathBuf = std::env::temp_dir().join(format!(
        "pbxcodec-{}-project.pbxproj",
        std::process::id()
    ));
    PBXProjWriter::to_path(&proj, &path)?;
    let read = PBXProjReader::from_path(&path);
    std::fs::remove_file(&path)?;

    assert_eq!(read?, proj);
    Ok(())
}

#[test]
fn test_missing_file() {
    let result = PBXProjReader::from_path("/nonexistent/project.pbxproj");
    assert!(matches!(result, Err(Error::FileError(_))));
}

#[test]
fn test_not_a_property_list() {
    let broken = b"<plist><dict><key>broken</dict></plist>".to_vec();
    let result = PBXProjReader::from_reader(Cursor::new(broken));
    assert!(matches!(result, Err(Error::PropertyList(_))));
}
