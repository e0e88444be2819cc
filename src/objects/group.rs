//! Groups of the project navigator.

use std::marker::PhantomData;

use crate::coding::{FieldValue, KeyedObjectBuilder};
use crate::objects::{
    view, Codeable, PBXFileReference, PBXReferenceProxy, PBXSourceTree,
};
use crate::Result;

codeable! {
    /// A group in the project navigator.
    PBXGroup => PBXGroup
}

codeable! {
    /// The localized variants of one file, e.g. `Main.storyboard` for each language.
    PBXVariantGroup => PBXVariantGroup
}

codeable! {
    /// A versioned group, such as a Core Data model with several versions.
    XCVersionGroup => XCVersionGroup
}

codeable_family! {
    /// Anything a group can contain.
    GroupChild {
        /// A file
        FileReference(PBXFileReference),
        /// A nested group
        Group(PBXGroup),
        /// A variant group
        VariantGroup(PBXVariantGroup),
        /// A version group
        VersionGroup(XCVersionGroup),
        /// A product of another project
        ReferenceProxy(PBXReferenceProxy),
    }
}

impl GroupChild {
    /// The display name of the child
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn name(&self) -> Result<Option<String>> {
        self.as_object().get("name")
    }

    /// The path of the child
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn path(&self) -> Result<Option<String>> {
        self.as_object().get("path")
    }

    /// The key children are ordered by when a group sorts them: the name, or the path when the
    /// child has no name.
    fn sort_key(&self) -> Result<String> {
        Ok(match self.name()? {
            Some(name) => name,
            None => self.path()?.unwrap_or_default(),
        })
    }
}

macro_rules! group_fields {
    ($($ty:ident),+) => {
        $(
            impl $ty {
                /// Starts building a group of this kind.
                #[must_use]
                pub fn builder() -> PBXGroupBuilder<$ty> {
                    PBXGroupBuilder::new()
                }

                /// Starts a builder overriding fields of this group.
                #[must_use]
                pub fn to_builder(&self) -> PBXGroupBuilder<$ty> {
                    PBXGroupBuilder::from_parent(self)
                }

                /// The display name
                ///
                /// # Errors
                /// Returns an error if the field cannot be decoded.
                pub fn name(&self) -> Result<Option<String>> {
                    self.0.get("name")
                }

                /// The folder this group stands for
                ///
                /// # Errors
                /// Returns an error if the field cannot be decoded.
                pub fn path(&self) -> Result<Option<String>> {
                    self.0.get("path")
                }

                /// The base location of the path
                ///
                /// # Errors
                /// Returns an error if the field holds an unknown source tree.
                pub fn source_tree(&self) -> Result<Option<PBXSourceTree>> {
                    self.0.get("sourceTree")
                }

                /// The children, in display order
                ///
                /// # Errors
                /// Returns an error if a child reference cannot be resolved.
                pub fn children(&self) -> Result<Vec<GroupChild>> {
                    self.0.list("children")
                }
            }
        )+
    };
}

group_fields!(PBXGroup, PBXVariantGroup, XCVersionGroup);

impl XCVersionGroup {
    /// The active version
    ///
    /// # Errors
    /// Returns an error if the reference cannot be resolved.
    pub fn current_version(&self) -> Result<Option<PBXFileReference>> {
        self.0.get("currentVersion")
    }

    /// The type of the versioned file, e.g. `wrapper.xcdatamodel`
    ///
    /// # Errors
    /// Returns an error if the field cannot be decoded.
    pub fn version_group_type(&self) -> Result<Option<String>> {
        self.0.get("versionGroupType")
    }
}

/// Builder for the group kinds.
#[derive(Debug, Clone)]
pub struct PBXGroupBuilder<T> {
    inner: KeyedObjectBuilder,
    children: Option<Vec<GroupChild>>,
    sort_by_name: bool,
    group: PhantomData<T>,
}

/// Builder for [`XCVersionGroup`]
pub type XCVersionGroupBuilder = PBXGroupBuilder<XCVersionGroup>;

impl<T: Codeable> PBXGroupBuilder<T> {
    fn new() -> Self {
        PBXGroupBuilder {
            inner: KeyedObjectBuilder::new(T::KINDS[0]),
            children: None,
            sort_by_name: false,
            group: PhantomData,
        }
    }

    fn from_parent(parent: &T) -> Self {
        PBXGroupBuilder {
            inner: parent.as_object().to_builder(),
            children: None,
            sort_by_name: false,
            group: PhantomData,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.set("name", FieldValue::String(name.into()));
        self
    }

    /// Sets the folder this group stands for.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.inner.set("path", FieldValue::String(path.into()));
        self
    }

    /// Sets the base location of the path.
    #[must_use]
    pub fn source_tree(mut self, source_tree: PBXSourceTree) -> Self {
        self.inner.set("sourceTree", source_tree);
        self
    }

    /// Appends a child.
    #[must_use]
    pub fn child(mut self, child: impl Into<GroupChild>) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child.into());
        self
    }

    /// Replaces the children.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = GroupChild>) -> Self {
        self.children = Some(children.into_iter().collect());
        self
    }

    /// Orders the children by name, or by path for children without a name.
    #[must_use]
    pub fn sort_by_name(mut self) -> Self {
        self.sort_by_name = true;
        self
    }

    /// Skips the required-field checks.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.inner = self.inner.lenient();
        self
    }

    /// Builds the group. The source tree defaults to [`PBXSourceTree::Group`] and the children
    /// to none.
    ///
    /// # Errors
    /// Returns an error if a child's name cannot be read while sorting.
    pub fn build(mut self) -> Result<T> {
        if let Some(mut children) = self.children.take() {
            if self.sort_by_name {
                let mut keyed = children
                    .drain(..)
                    .map(|child| Ok((child.sort_key()?, child)))
                    .collect::<Result<Vec<_>>>()?;
                keyed.sort_by(|(left, _), (right, _)| left.cmp(right));
                children = keyed.into_iter().map(|(_, child)| child).collect();
            }
            self.inner.set("children", children);
        }

        let object = self
            .inner
            .if_absent("sourceTree", PBXSourceTree::Group)
            .if_absent("children", Vec::<FieldValue>::new())
            .build()?;
        view(object)
    }
}

impl PBXGroupBuilder<XCVersionGroup> {
    /// Sets the active version.
    #[must_use]
    pub fn current_version(mut self, version: PBXFileReference) -> Self {
        self.inner.set("currentVersion", version);
        self
    }

    /// Sets the type of the versioned file.
    #[must_use]
    pub fn version_group_type(mut self, file_type: impl Into<String>) -> Self {
        self.inner
            .set("versionGroupType", FieldValue::String(file_type.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> Result<PBXFileReference> {
        PBXFileReference::of_group(path)
    }

    #[test]
    fn test_children_keep_insertion_order() -> Result<()> {
        let group = PBXGroup::builder()
            .name("Sources")
            .child(file("b.c")?)
            .child(file("a.c")?)
            .build()?;
        let paths = group
            .children()?
            .iter()
            .map(GroupChild::path)
            .collect::<Result<Vec<_>>>()?;

        assert_eq!(paths, vec![Some("b.c".to_string()), Some("a.c".to_string())]);
        assert_eq!(group.source_tree()?, Some(PBXSourceTree::Group));
        Ok(())
    }

    #[test]
    fn test_sort_by_name_falls_back_to_path() -> Result<()> {
        let nested = PBXGroup::builder().name("Models").build()?;
        let group = PBXGroup::builder()
            .child(file("zeta.c")?)
            .child(nested)
            .child(file("alpha.c")?)
            .sort_by_name()
            .build()?;
        let keys = group
            .children()?
            .iter()
            .map(GroupChild::sort_key)
            .collect::<Result<Vec<_>>>()?;

        assert_eq!(keys, vec!["Models", "alpha.c", "zeta.c"]);
        Ok(())
    }

    #[test]
    fn test_version_group() -> Result<()> {
        let version = file("Model 2.xcdatamodel")?;
        let group = XCVersionGroup::builder()
            .path("Model.xcdatamodeld")
            .child(file("Model.xcdatamodel")?)
            .child(version.clone())
            .current_version(version.clone())
            .version_group_type("wrapper.xcdatamodel")
            .build()?;

        assert_eq!(group.current_version()?, Some(version));
        assert_eq!(group.children()?.len(), 2);
        assert_eq!(
            group.version_group_type()?.as_deref(),
            Some("wrapper.xcdatamodel")
        );
        Ok(())
    }
}
