//! Closed enumerations stored in object fields.
//!
//! String-valued enumerations ([`PBXSourceTree`], [`ProductType`], [`RequirementKind`]) are
//! written using their textual spelling; integer-valued ones ([`ProxyType`], [`SubFolder`]) using
//! their discriminant.

use strum::{AsRefStr, Display, EnumIter, EnumString, FromRepr, IntoStaticStr};

/// Base location a file reference or group path is relative to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr,
)]
pub enum PBXSourceTree {
    /// Path is absolute
    #[strum(serialize = "<absolute>")]
    Absolute,
    /// Path is relative to the enclosing group
    #[strum(serialize = "<group>")]
    Group,
    /// Path is relative to the project directory
    #[strum(serialize = "SOURCE_ROOT")]
    SourceRoot,
    /// Path is relative to the built products directory
    #[strum(serialize = "BUILT_PRODUCTS_DIR")]
    BuiltProductsDir,
    /// Path is relative to the active SDK
    #[strum(serialize = "SDKROOT")]
    SdkRoot,
    /// Path is relative to the developer directory
    #[strum(serialize = "DEVELOPER_DIR")]
    DeveloperDir,
}

/// Product type of a target, written as its `com.apple.product-type.*` identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr,
)]
pub enum ProductType {
    /// `com.apple.product-type.application`
    #[strum(serialize = "com.apple.product-type.application")]
    Application,
    /// `com.apple.product-type.framework`
    #[strum(serialize = "com.apple.product-type.framework")]
    Framework,
    /// `com.apple.product-type.framework.static`
    #[strum(serialize = "com.apple.product-type.framework.static")]
    StaticFramework,
    /// `com.apple.product-type.xcframework`
    #[strum(serialize = "com.apple.product-type.xcframework")]
    XcFramework,
    /// `com.apple.product-type.library.dynamic`
    #[strum(serialize = "com.apple.product-type.library.dynamic")]
    DynamicLibrary,
    /// `com.apple.product-type.library.static`
    #[strum(serialize = "com.apple.product-type.library.static")]
    StaticLibrary,
    /// `com.apple.product-type.bundle`
    #[strum(serialize = "com.apple.product-type.bundle")]
    Bundle,
    /// `com.apple.product-type.bundle.unit-test`
    #[strum(serialize = "com.apple.product-type.bundle.unit-test")]
    UnitTestBundle,
    /// `com.apple.product-type.bundle.ui-testing`
    #[strum(serialize = "com.apple.product-type.bundle.ui-testing")]
    UiTestBundle,
    /// `com.apple.product-type.app-extension`
    #[strum(serialize = "com.apple.product-type.app-extension")]
    AppExtension,
    /// `com.apple.product-type.tool`
    #[strum(serialize = "com.apple.product-type.tool")]
    CommandLineTool,
    /// `com.apple.product-type.application.watchapp`
    #[strum(serialize = "com.apple.product-type.application.watchapp")]
    WatchApp,
    /// `com.apple.product-type.application.watchapp2`
    #[strum(serialize = "com.apple.product-type.application.watchapp2")]
    Watch2App,
    /// `com.apple.product-type.application.watchapp2-container`
    #[strum(serialize = "com.apple.product-type.application.watchapp2-container")]
    Watch2AppContainer,
    /// `com.apple.product-type.watchkit-extension`
    #[strum(serialize = "com.apple.product-type.watchkit-extension")]
    WatchExtension,
    /// `com.apple.product-type.watchkit2-extension`
    #[strum(serialize = "com.apple.product-type.watchkit2-extension")]
    Watch2Extension,
    /// `com.apple.product-type.tv-app-extension`
    #[strum(serialize = "com.apple.product-type.tv-app-extension")]
    TvExtension,
    /// `com.apple.product-type.application.messages`
    #[strum(serialize = "com.apple.product-type.application.messages")]
    MessagesApplication,
    /// `com.apple.product-type.app-extension.messages`
    #[strum(serialize = "com.apple.product-type.app-extension.messages")]
    MessagesExtension,
    /// `com.apple.product-type.app-extension.messages-sticker-pack`
    #[strum(serialize = "com.apple.product-type.app-extension.messages-sticker-pack")]
    StickerPack,
    /// `com.apple.product-type.xpc-service`
    #[strum(serialize = "com.apple.product-type.xpc-service")]
    XpcService,
    /// `com.apple.product-type.bundle.ocunit-test`
    #[strum(serialize = "com.apple.product-type.bundle.ocunit-test")]
    OcUnitTestBundle,
    /// `com.apple.product-type.xcode-extension`
    #[strum(serialize = "com.apple.product-type.xcode-extension")]
    XcodeExtension,
    /// `com.apple.product-type.instruments-package`
    #[strum(serialize = "com.apple.product-type.instruments-package")]
    InstrumentsPackage,
    /// `com.apple.product-type.app-extension.intents-service`
    #[strum(serialize = "com.apple.product-type.app-extension.intents-service")]
    IntentsServiceExtension,
    /// `com.apple.product-type.application.on-demand-install-capable`
    #[strum(serialize = "com.apple.product-type.application.on-demand-install-capable")]
    OnDemandInstallCapableApplication,
    /// `com.apple.product-type.metal-library`
    #[strum(serialize = "com.apple.product-type.metal-library")]
    MetalLibrary,
    /// `com.apple.product-type.driver-extension`
    #[strum(serialize = "com.apple.product-type.driver-extension")]
    DriverExtension,
    /// `com.apple.product-type.system-extension`
    #[strum(serialize = "com.apple.product-type.system-extension")]
    SystemExtension,
}

impl ProductType {
    /// File extension of the product this type builds, if it has one.
    #[must_use]
    pub fn product_extension(self) -> Option<&'static str> {
        Some(match self {
            ProductType::Application
            | ProductType::WatchApp
            | ProductType::Watch2App
            | ProductType::Watch2AppContainer
            | ProductType::MessagesApplication
            | ProductType::OnDemandInstallCapableApplication => "app",
            ProductType::Framework | ProductType::StaticFramework => "framework",
            ProductType::XcFramework => "xcframework",
            ProductType::DynamicLibrary => "dylib",
            ProductType::StaticLibrary => "a",
            ProductType::Bundle => "bundle",
            ProductType::UnitTestBundle | ProductType::UiTestBundle => "xctest",
            ProductType::AppExtension
            | ProductType::WatchExtension
            | ProductType::Watch2Extension
            | ProductType::TvExtension
            | ProductType::MessagesExtension
            | ProductType::StickerPack
            | ProductType::XcodeExtension
            | ProductType::IntentsServiceExtension => "appex",
            ProductType::XpcService => "xpc",
            ProductType::OcUnitTestBundle => "octest",
            ProductType::InstrumentsPackage => "instrpkg",
            ProductType::MetalLibrary => "metallib",
            ProductType::DriverExtension => "dext",
            ProductType::SystemExtension => "systemextension",
            ProductType::CommandLineTool => return None,
        })
    }
}

/// Kind of object a [`crate::objects::PBXContainerItemProxy`] stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum ProxyType {
    /// The proxy names a target, as used by target dependencies
    TargetReference = 1,
    /// The proxy names a product, as used by reference proxies
    Reference = 2,
}

/// Destination of a copy files build phase (`dstSubfolderSpec`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, FromRepr)]
#[repr(u8)]
pub enum SubFolder {
    /// Absolute path given by `dstPath`
    AbsolutePath = 0,
    /// The product wrapper
    Wrapper = 1,
    /// The executables directory
    Executables = 6,
    /// The resources directory
    Resources = 7,
    /// The frameworks directory
    Frameworks = 10,
    /// The shared frameworks directory
    SharedFrameworks = 11,
    /// The shared support directory
    SharedSupport = 12,
    /// The plug-ins directory
    Plugins = 13,
    /// The Java resources directory
    JavaResources = 15,
    /// The built products directory
    ProductsDirectory = 16,
}

/// Discriminant of an inline Swift package version requirement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum RequirementKind {
    /// A fixed commit
    Revision,
    /// The head of a branch
    Branch,
    /// One exact version
    ExactVersion,
    /// Any version in `[minimumVersion, maximumVersion)`
    VersionRange,
    /// Any version below the next minor release
    UpToNextMinorVersion,
    /// Any version below the next major release
    UpToNextMajorVersion,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_source_tree_spelling() {
        assert_eq!(PBXSourceTree::Group.as_ref(), "<group>");
        assert_eq!("SOURCE_ROOT".parse::<PBXSourceTree>().ok(), Some(PBXSourceTree::SourceRoot));
        assert!("<nowhere>".parse::<PBXSourceTree>().is_err());
    }

    #[test]
    fn test_product_types() {
        assert_eq!(ProductType::iter().count(), 29);
        for product in ProductType::iter() {
            assert!(product.as_ref().starts_with("com.apple.product-type."));
            assert_eq!(product.as_ref().parse::<ProductType>().ok(), Some(product));
        }
        assert_eq!(ProductType::StaticLibrary.product_extension(), Some("a"));
        assert_eq!(ProductType::CommandLineTool.product_extension(), None);
    }

    #[test]
    fn test_integer_enums() {
        assert_eq!(ProxyType::from_repr(1), Some(ProxyType::TargetReference));
        assert_eq!(ProxyType::from_repr(3), None);
        assert_eq!(SubFolder::from_repr(10), Some(SubFolder::Frameworks));
        assert_eq!(SubFolder::ProductsDirectory as u8, 16);
    }

    #[test]
    fn test_requirement_kind_spelling() {
        assert_eq!(RequirementKind::UpToNextMajorVersion.as_ref(), "upToNextMajorVersion");
        assert_eq!(
            "exactVersion".parse::<RequirementKind>().ok(),
            Some(RequirementKind::ExactVersion)
        );
    }
}
