use pbxcodec::objects::{PBXContainerItemProxy, PBXTargetDependency};
use pbxcodec::prelude::*;

fn entry<'a>(proj: &'a PBXProj, gid: &str) -> Result<&'a PBXObjectReference> {
    proj.objects().get_by_id(gid).ok_or_else(|| Error::DanglingReference {
        gid: gid.to_string(),
        field: "test".to_string(),
    })
}

fn gid_of(entry: &PBXObjectReference, field: &str) -> Option<String> {
    entry.get(field).and_then(Value::as_str).map(str::to_string)
}

#[test]
fn test_target_dependency_references_table_gid() -> Result<()> {
    let prepare = PBXAggregateTarget::builder().name("Prepare").build()?;
    let app = PBXNativeTarget::builder()
        .name("App")
        .product_type(ProductType::Application)
        .dependency(PBXTargetDependency::builder().target(prepare.clone()).build()?)
        .build()?;
    let project = PBXProject::builder().target(app).target(prepare).build()?;

    let proj = PBXObjectArchiver::new().encode(&project)?;
    let objects = proj.objects();

    let native = objects.of_isa("PBXNativeTarget").collect::<Vec<_>>();
    let aggregate = objects.of_isa("PBXAggregateTarget").collect::<Vec<_>>();
    assert_eq!(native.len(), 1);
    assert_eq!(aggregate.len(), 1);
    assert_eq!(objects.of_isa("PBXLegacyTarget").count(), 0);

    // One configuration list per target plus the project's own
    assert_eq!(objects.of_isa("XCConfigurationList").count(), 3);
    assert_eq!(objects.of_isa("XCBuildConfiguration").count(), 3);
    for target in native.iter().chain(aggregate.iter()) {
        let list = gid_of(target, "buildConfigurationList");
        let list = entry(&proj, list.as_deref().unwrap_or_default())?;
        assert_eq!(list.isa(), Some("XCConfigurationList"));
    }

    let dependencies = match native[0].get("dependencies") {
        Some(Value::Array(values)) => values.clone(),
        other => panic!("unexpected dependencies {other:?}"),
    };
    assert_eq!(dependencies.len(), 1);
    let dependency = entry(&proj, dependencies[0].as_str().unwrap_or_default())?;
    assert_eq!(dependency.isa(), Some("PBXTargetDependency"));
    assert_eq!(
        gid_of(dependency, "target").as_deref(),
        Some(aggregate[0].global_id())
    );

    let root = entry(&proj, proj.root_object())?;
    assert_eq!(
        root.get("targets"),
        Some(&Value::Array(vec![
            Value::from(native[0].global_id()),
            Value::from(aggregate[0].global_id()),
        ]))
    );
    Ok(())
}

#[test]
fn test_dependency_through_container_proxy() -> Result<()> {
    let prepare = PBXAggregateTarget::builder().name("Prepare").build()?;
    let first = PBXObjectArchiver::new().encode(
        &PBXProject::builder().target(prepare.clone()).build()?,
    )?;
    let decoded = PBXObjectUnarchiver::new().decode(&first)?;
    let prepare = decoded.target("Prepare")?.ok_or(Error::MissingField {
        kind: ObjectKind::PBXAggregateTarget,
        field: "name",
    })?;
    let prepare_gid = prepare.global_id().map(str::to_string).unwrap_or_default();

    let proxy = PBXContainerItemProxy::builder()
        .container_portal(decoded.clone())
        .remote_global_id_string(prepare_gid.clone())
        .remote_info("Prepare")
        .build()?;
    let app = PBXNativeTarget::builder()
        .name("App")
        .dependency(
            PBXTargetDependency::builder()
                .target(prepare.clone())
                .target_proxy(proxy)
                .build()?,
        )
        .build()?;
    let updated = decoded.to_builder().target(app).build()?;

    let proj = PBXObjectArchiver::for_rewrite(&first).encode(&updated)?;
    let project = PBXObjectUnarchiver::new().decode(&proj)?;
    let app = project.target("App")?.ok_or(Error::MissingField {
        kind: ObjectKind::PBXNativeTarget,
        field: "name",
    })?;

    let dependency = &app.dependencies()?[0];
    let proxy = dependency.target_proxy()?.ok_or(Error::MissingField {
        kind: ObjectKind::PBXTargetDependency,
        field: "targetProxy",
    })?;
    assert_eq!(proxy.proxy_type()?, Some(ProxyType::TargetReference));
    assert_eq!(proxy.remote_global_id_string()?, Some(prepare_gid.clone()));
    assert_eq!(proxy.container_portal()?.global_id(), Some(proj.root_object()));
    assert_eq!(
        dependency.target()?.and_then(|t| t.global_id().map(str::to_string)),
        Some(prepare_gid)
    );
    Ok(())
}

#[test]
fn test_file_type_inferred_from_extension() -> Result<()> {
    let file = PBXFileReference::builder().path("src/Foo.c").build()?;
    assert_eq!(file.last_known_file_type()?.as_deref(), Some("sourcecode.c.c"));
    assert_eq!(file.explicit_file_type()?, None);

    let proj = PBXObjectArchiver::new().encode(&PBXProject::builder().file(file).build()?)?;
    let entries = proj.objects().of_isa("PBXFileReference").collect::<Vec<_>>();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0].get("lastKnownFileType"),
        Some(&Value::from("sourcecode.c.c"))
    );
    assert_eq!(entries[0].get("explicitFileType"), None);
    assert_eq!(entries[0].get("sourceTree"), Some(&Value::from("<group>")));
    Ok(())
}

#[test]
fn test_explicit_file_type_wins() -> Result<()> {
    let file = PBXFileReference::builder()
        .path("App.app")
        .explicit_file_type("wrapper.application")
        .source_tree(PBXSourceTree::BuiltProductsDir)
        .include_in_index(false)
        .build()?;

    assert_eq!(file.explicit_file_type()?.as_deref(), Some("wrapper.application"));
    assert_eq!(file.last_known_file_type()?, None);
    assert_eq!(file.include_in_index()?, Some(false));
    Ok(())
}

#[test]
fn test_unknown_extension_has_no_type() -> Result<()> {
    let file = PBXFileReference::builder().path("notes.unknownext").build()?;
    assert_eq!(file.last_known_file_type()?, None);
    assert_eq!(file.explicit_file_type()?, None);
    Ok(())
}
