//! Target dependencies and container item proxies.

use crate::coding::{FieldValue, KeyedObjectBuilder, ObjectKind};
use crate::objects::{view, Codeable, PBXFileReference, PBXProject, PBXTarget, ProxyType};
use crate::Result;

codeable! {
    /// A dependency of one target on another, in this project or in a referenced one.
    PBXTargetDependency => PBXTargetDependency
}

codeable! {
    /// Stands for an object inside a container, either this project or a referenced project file.
    PBXContainerItemProxy => PBXContainerItemProxy
}

codeable_family! {
    /// The container a proxy points into.
    ContainerPortal {
        /// The project holding the proxy
        Project(PBXProject),
        /// A referenced `.xcodeproj`
        FileReference(PBXFileReference),
    }
}

impl PBXTargetDependency {
    /// Starts building a target dependency.
    #[must_use]
    pub fn builder() -> PBXTargetDependencyBuilder {
        PBXTargetDependencyBuilder {
            inner: KeyedObjectBuilder::new(ObjectKind::PBXTargetDependency),
        }
    }

    /// Starts a builder overriding fields of this dependency.
    #[must_use]
    pub fn to_builder(&self) -> PBXTargetDependencyBuilder {
        PBXTargetDependencyBuilder {
            inner: self.as_object().to_builder(),
        }
    }

    /// Name of the dependency, mostly set for cross-project dependencies
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn name(&self) -> Result<Option<String>> {
        self.0.get("name")
    }

    /// The target depended on, when it lives in the same project
    ///
    /// # Errors
    /// Returns an error if the reference cannot be resolved.
    pub fn target(&self) -> Result<Option<PBXTarget>> {
        self.0.get("target")
    }

    /// The proxy naming the target depended on
    ///
    /// # Errors
    /// Returns an error if the reference cannot be resolved.
    pub fn target_proxy(&self) -> Result<Option<PBXContainerItemProxy>> {
        self.0.get("targetProxy")
    }
}

/// Builder for [`PBXTargetDependency`]
#[derive(Debug, Clone)]
pub struct PBXTargetDependencyBuilder {
    inner: KeyedObjectBuilder,
}

impl PBXTargetDependencyBuilder {
    /// Sets the dependency name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.set("name", FieldValue::String(name.into()));
        self
    }

    /// Sets the target depended on.
    #[must_use]
    pub fn target(mut self, target: impl Into<PBXTarget>) -> Self {
        let target: PBXTarget = target.into();
        self.inner.set("target", target);
        self
    }

    /// Sets the proxy naming the target depended on.
    #[must_use]
    pub fn target_proxy(mut self, proxy: PBXContainerItemProxy) -> Self {
        self.inner.set("targetProxy", proxy);
        self
    }

    /// Skips the required-field checks.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.inner = self.inner.lenient();
        self
    }

    /// Builds the dependency. Both the target and its proxy are optional.
    ///
    /// # Errors
    /// Returns an error if the dependency cannot be built.
    pub fn build(self) -> Result<PBXTargetDependency> {
        view(self.inner.build()?)
    }
}

impl PBXContainerItemProxy {
    /// Starts building a container item proxy.
    #[must_use]
    pub fn builder() -> PBXContainerItemProxyBuilder {
        PBXContainerItemProxyBuilder {
            inner: KeyedObjectBuilder::new(ObjectKind::PBXContainerItemProxy),
        }
    }

    /// Starts a builder overriding fields of this proxy.
    #[must_use]
    pub fn to_builder(&self) -> PBXContainerItemProxyBuilder {
        PBXContainerItemProxyBuilder {
            inner: self.as_object().to_builder(),
        }
    }

    /// The container holding the remote object
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if the container is absent, or any decode error.
    pub fn container_portal(&self) -> Result<ContainerPortal> {
        self.0.require("containerPortal")
    }

    /// What the remote object is
    ///
    /// # Errors
    /// Returns an error if the field holds an unknown proxy type.
    pub fn proxy_type(&self) -> Result<Option<ProxyType>> {
        self.0.get("proxyType")
    }

    /// Gid of the remote object inside its container
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn remote_global_id_string(&self) -> Result<Option<String>> {
        self.0.get("remoteGlobalIDString")
    }

    /// Name of the remote object, usually a target name
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn remote_info(&self) -> Result<Option<String>> {
        self.0.get("remoteInfo")
    }
}

/// Builder for [`PBXContainerItemProxy`]
#[derive(Debug, Clone)]
pub struct PBXContainerItemProxyBuilder {
    inner: KeyedObjectBuilder,
}

impl PBXContainerItemProxyBuilder {
    /// Sets the container holding the remote object.
    #[must_use]
    pub fn container_portal(mut self, portal: impl Into<ContainerPortal>) -> Self {
        let portal: ContainerPortal = portal.into();
        self.inner.set("containerPortal", portal);
        self
    }

    /// Sets what the remote object is.
    #[must_use]
    pub fn proxy_type(mut self, proxy_type: ProxyType) -> Self {
        self.inner.set("proxyType", proxy_type);
        self
    }

    /// Sets the gid of the remote object.
    #[must_use]
    pub fn remote_global_id_string(mut self, gid: impl Into<String>) -> Self {
        self.inner
            .set("remoteGlobalIDString", FieldValue::String(gid.into()));
        self
    }

    /// Sets the name of the remote object.
    #[must_use]
    pub fn remote_info(mut self, info: impl Into<String>) -> Self {
        self.inner.set("remoteInfo", FieldValue::String(info.into()));
        self
    }

    /// Skips the required-field checks.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.inner = self.inner.lenient();
        self
    }

    /// Builds the proxy. The proxy type defaults to [`ProxyType::TargetReference`].
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingField`] if no container was given.
    pub fn build(self) -> Result<PBXContainerItemProxy> {
        let object = self
            .inner
            .if_absent("proxyType", ProxyType::TargetReference)
            .requires("containerPortal")
            .build()?;
        view(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::PBXNativeTarget;
    use crate::Error;

    #[test]
    fn test_dependency_on_local_target() -> Result<()> {
        let target = PBXNativeTarget::builder().name("Lib").build()?;
        let dependency = PBXTargetDependency::builder().target(target.clone()).build()?;

        assert_eq!(dependency.target()?, Some(PBXTarget::Native(target)));
        assert_eq!(dependency.target_proxy()?, None);
        Ok(())
    }

    #[test]
    fn test_cross_project_proxy() -> Result<()> {
        let project_file = PBXFileReference::of_group("Other/Other.xcodeproj")?;
        let proxy = PBXContainerItemProxy::builder()
            .container_portal(project_file.clone())
            .remote_global_id_string("0123456789ABCDEF01234567")
            .remote_info("OtherLib")
            .build()?;

        assert_eq!(
            proxy.container_portal()?,
            ContainerPortal::FileReference(project_file)
        );
        assert_eq!(proxy.proxy_type()?, Some(ProxyType::TargetReference));
        assert_eq!(proxy.remote_info()?.as_deref(), Some("OtherLib"));
        Ok(())
    }

    #[test]
    fn test_portal_is_required() {
        assert!(matches!(
            PBXContainerItemProxy::builder().remote_info("Lib").build(),
            Err(Error::MissingField { field: "containerPortal", .. })
        ));
    }
}
