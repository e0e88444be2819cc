//! File type identifiers.
//!
//! Xcode identifies the type of a file reference by a Uniform Type Identifier such as
//! `sourcecode.c.c`. Builders infer it from the file extension when none is given.

use phf::{phf_map, phf_set, Map, Set};

/// File extension (without the dot) to file type identifier
pub static FILE_EXTENSION_TO_IDENTIFIER: Map<&'static str, &'static str> = phf_map! {
    "1" => "text.man",
    "a" => "archive.ar",
    "ada" => "sourcecode.ada",
    "adb" => "sourcecode.ada",
    "ads" => "sourcecode.ada",
    "aiff" => "audio.aiff",
    "app" => "wrapper.application",
    "appex" => "wrapper.app-extension",
    "applescript" => "sourcecode.applescript",
    "archivingdescription" => "text.xml.ibArchivingDescription",
    "asdictionary" => "archive.asdictionary",
    "asm" => "sourcecode.asm.asm",
    "au" => "audio.au",
    "avi" => "video.avi",
    "bdic" => "file",
    "bin" => "archive.macbinary",
    "bmp" => "image.bmp",
    "bundle" => "wrapper.cfbundle",
    "c" => "sourcecode.c.c",
    "c++" => "sourcecode.cpp.cpp",
    "cc" => "sourcecode.cpp.cpp",
    "cdda" => "audio.aiff",
    "cl" => "sourcecode.opencl",
    "class" => "compiled.javaclass",
    "classdescription" => "text.plist.ibClassDescription",
    "classdescriptions" => "text.plist.ibClassDescription",
    "codingdescription" => "text.xml.ibCodingDescription",
    "cp" => "sourcecode.cpp.cpp",
    "cpp" => "sourcecode.cpp.cpp",
    "csh" => "text.script.csh",
    "css" => "text.css",
    "ctrl" => "sourcecode.glsl",
    "cxx" => "sourcecode.cpp.cpp",
    "d" => "sourcecode.dtrace",
    "dart" => "sourcecode",
    "data" => "compiled",
    "defs" => "sourcecode.mig",
    "dict" => "text.plist",
    "dsym" => "wrapper.dsym",
    "dylan" => "sourcecode.dylan",
    "dylib" => "compiled.mach-o.dylib",
    "ear" => "archive.ear",
    "eval" => "sourcecode.glsl",
    "exp" => "sourcecode.exports",
    "f" => "sourcecode.fortran",
    "f77" => "sourcecode.fortran.f77",
    "f90" => "sourcecode.fortran.f90",
    "f95" => "sourcecode.fortran.f90",
    "for" => "sourcecode.fortran",
    "frag" => "sourcecode.glsl",
    "fragment" => "sourcecode.glsl",
    "framework" => "wrapper.framework",
    "fs" => "sourcecode.glsl",
    "fsh" => "sourcecode.glsl",
    "geom" => "sourcecode.glsl",
    "geometry" => "sourcecode.glsl",
    "gif" => "image.gif",
    "gmk" => "sourcecode.make",
    "gs" => "sourcecode.glsl",
    "gsh" => "sourcecode.glsl",
    "gyp" => "sourcecode",
    "gypi" => "text",
    "gz" => "archive.gzip",
    "h" => "sourcecode.c.h",
    "h++" => "sourcecode.cpp.h",
    "hh" => "sourcecode.cpp.h",
    "hp" => "sourcecode.cpp.h",
    "hpp" => "sourcecode.cpp.h",
    "hqx" => "archive.binhex",
    "htm" => "text.html",
    "html" => "text.html",
    "htmld" => "wrapper.htmld",
    "hxx" => "sourcecode.cpp.h",
    "i" => "sourcecode.c.c.preprocessed",
    "icns" => "image.icns",
    "ico" => "image.ico",
    "iconset" => "folder.iconset",
    "ii" => "sourcecode.cpp.cpp.preprocessed",
    "imagecatalog" => "folder.imagecatalog",
    "inc" => "sourcecode.pascal",
    "inl" => "sourcecode.cpp.h",
    "ipp" => "sourcecode.cpp.h",
    "jam" => "sourcecode.jam",
    "jar" => "archive.jar",
    "java" => "sourcecode.java",
    "javascript" => "sourcecode.javascript",
    "jpeg" => "image.jpeg",
    "jpg" => "image.jpeg",
    "js" => "sourcecode.javascript",
    "jscript" => "sourcecode.javascript",
    "json" => "text.json",
    "jsp" => "text.html.other",
    "kext" => "wrapper.kernel-extension",
    "l" => "sourcecode.lex",
    "lid" => "sourcecode.dylan",
    "ll" => "sourcecode.asm.llvm",
    "llx" => "sourcecode.asm.llvm",
    "lm" => "sourcecode.lex",
    "lmm" => "sourcecode.lex",
    "lp" => "sourcecode.lex",
    "lpp" => "sourcecode.lex",
    "lxx" => "sourcecode.lex",
    "m" => "sourcecode.c.objc",
    "mak" => "sourcecode.make",
    "map" => "sourcecode.module-map",
    "markdown" => "net.daringfireball.markdown",
    "md" => "net.daringfireball.markdown",
    "mdimporter" => "wrapper.spotlight-importer",
    "mdown" => "net.daringfireball.markdown",
    "mi" => "sourcecode.c.objc.preprocessed",
    "mid" => "audio.midi",
    "midi" => "audio.midi",
    "mig" => "sourcecode.mig",
    "mii" => "sourcecode.cpp.objcpp.preprocessed",
    "mm" => "sourcecode.cpp.objcpp",
    "modulemap" => "sourcecode.module-map",
    "moov" => "video.quicktime",
    "mov" => "video.quicktime",
    "mp3" => "audio.mp3",
    "mpeg" => "video.mpeg",
    "mpg" => "video.mpeg",
    "mpkg" => "wrapper.installer-mpkg",
    "nasm" => "sourcecode.nasm",
    "nib" => "wrapper.nib",
    "nib~" => "wrapper.nib",
    "nqc" => "sourcecode.nqc",
    "o" => "compiled.mach-o.objfile",
    "octest" => "wrapper.cfbundle",
    "p" => "sourcecode.pascal",
    "pas" => "sourcecode.pascal",
    "pbfilespec" => "text.plist.pbfilespec",
    "pblangspec" => "text.plist.pblangspec",
    "pbxproj" => "text.pbxproject",
    "pch" => "sourcecode.c.h",
    "pch++" => "sourcecode.cpp.h",
    "pct" => "image.pict",
    "pdf" => "image.pdf",
    "perl" => "text.script.perl",
    "php" => "text.script.php",
    "php3" => "text.script.php",
    "php4" => "text.script.php",
    "phtml" => "text.script.php",
    "pict" => "image.pict",
    "pkg" => "wrapper.installer-pkg",
    "pl" => "text.script.perl",
    "plist" => "text.plist",
    "pluginkit" => "wrapper.app-extension",
    "pm" => "text.script.perl",
    "png" => "image.png",
    "pp" => "sourcecode.pascal",
    "ppob" => "archive.ppob",
    "prefpane" => "wrapper.cfbundle",
    "proto" => "text",
    "py" => "text.script.python",
    "qtz" => "video.quartz-composer",
    "r" => "sourcecode.rez",
    "rb" => "text.script.ruby",
    "rbw" => "text.script.ruby",
    "rcx" => "compiled.rcx",
    "rez" => "sourcecode.rez",
    "rhtml" => "text.html.other",
    "rsrc" => "archive.rsrc",
    "rtf" => "text.rtf",
    "rtfd" => "wrapper.rtfd",
    "s" => "sourcecode.asm",
    "scnassets" => "wrapper.scnassets",
    "scriptSuite" => "text.plist.scriptSuite",
    "scriptTerminology" => "text.plist.scriptTerminology",
    "sh" => "text.script.sh",
    "shtml" => "text.html.other",
    "sit" => "archive.stuffit",
    "storyboard" => "file.storyboard",
    "strings" => "text.plist.strings",
    "stringsdict" => "file.bplist",
    "swift" => "sourcecode.swift",
    "tar" => "archive.tar",
    "tbd" => "sourcecode.text-based-dylib-definition",
    "tcc" => "sourcecode.cpp.cpp",
    "text" => "net.daringfireball.markdown",
    "tif" => "image.tiff",
    "tiff" => "image.tiff",
    "ttf" => "file",
    "txt" => "text",
    "uicatalog" => "file.uicatalog",
    "vert" => "sourcecode.glsl",
    "vertex" => "sourcecode.glsl",
    "view" => "archive.rsrc",
    "vs" => "sourcecode.glsl",
    "vsh" => "sourcecode.glsl",
    "war" => "archive.war",
    "wav" => "audio.wav",
    "worksheet" => "text.script.worksheet",
    "xcassets" => "folder.assetcatalog",
    "xcbuildrules" => "text.plist.xcbuildrules",
    "xcconfig" => "text.xcconfig",
    "xcdatamodel" => "wrapper.xcdatamodel",
    "xcdatamodeld" => "wrapper.xcdatamodeld",
    "xclangspec" => "text.plist.xclangspec",
    "xcode" => "wrapper.pb-project",
    "xcodeproj" => "wrapper.pb-project",
    "xcspec" => "text.plist.xcspec",
    "xcsynspec" => "text.plist.xcsynspec",
    "xctarget" => "wrapper.pb-target",
    "xctest" => "wrapper.cfbundle",
    "xctxtmacro" => "text.plist.xctxtmacro",
    "xcworkspace" => "wrapper.workspace",
    "xib" => "file.xib",
    "xpc" => "wrapper.xpc-service",
    "y" => "sourcecode.yacc",
    "ym" => "sourcecode.yacc",
    "ymm" => "sourcecode.yacc",
    "yp" => "sourcecode.yacc",
    "ypp" => "sourcecode.yacc",
    "yxx" => "sourcecode.yacc",
    "zip" => "archive.zip",
};

/// Identifiers Xcode mishandles when written as `explicitFileType`
pub static EXPLICIT_FILE_TYPE_BROKEN_IDENTIFIERS: Set<&'static str> = phf_set! {
    "file.xib",
    "file.storyboard",
    "wrapper.scnassets",
};

/// Identifiers written as `lastKnownFileType` so that renaming the file changes its type
pub static MODIFIABLE_FILE_TYPE_IDENTIFIERS: Set<&'static str> = phf_set! {
    "sourcecode.c.c",
    "sourcecode.c.h",
    "sourcecode.cpp.cpp",
    "sourcecode.cpp.h",
    "sourcecode.c.objc",
    "sourcecode.cpp.objcpp",
};

/// A file type inferred from a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Written as `explicitFileType`
    Explicit(&'static str),
    /// Written as `lastKnownFileType`
    LastKnown(&'static str),
}

impl FileType {
    /// Infers the file type of `path` from its extension.
    ///
    /// Returns `None` when the last path component has no extension or the extension is unknown.
    ///
    /// ```rust
    /// use pbxcodec::objects::FileType;
    ///
    /// assert_eq!(FileType::infer("src/Foo.c"), Some(FileType::LastKnown("sourcecode.c.c")));
    /// assert_eq!(FileType::infer("Info.plist"), Some(FileType::Explicit("text.plist")));
    /// assert_eq!(FileType::infer("Makefile"), None);
    /// ```
    #[must_use]
    pub fn infer(path: &str) -> Option<FileType> {
        let identifier = FILE_EXTENSION_TO_IDENTIFIER.get(file_extension(path)?)?;
        if EXPLICIT_FILE_TYPE_BROKEN_IDENTIFIERS.contains(identifier)
            || MODIFIABLE_FILE_TYPE_IDENTIFIERS.contains(identifier)
        {
            Some(FileType::LastKnown(identifier))
        } else {
            Some(FileType::Explicit(identifier))
        }
    }

    /// The file type identifier
    #[must_use]
    pub fn identifier(self) -> &'static str {
        match self {
            FileType::Explicit(identifier) | FileType::LastKnown(identifier) => identifier,
        }
    }
}

fn file_extension(path: &str) -> Option<&str> {
    let file_name = path.rsplit('/').next()?;
    file_name
        .rfind('.')
        .map(|index| &file_name[index + 1..])
        .filter(|extension| !extension.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        assert_eq!(file_extension("src/Foo.c"), Some("c"));
        assert_eq!(file_extension("a.b/Foo"), None);
        assert_eq!(file_extension("Foo."), None);
        assert_eq!(file_extension("archive.tar.gz"), Some("gz"));
    }

    #[test]
    fn test_inference() {
        assert_eq!(FileType::infer("main.m"), Some(FileType::LastKnown("sourcecode.c.objc")));
        assert_eq!(
            FileType::infer("Main.storyboard"),
            Some(FileType::LastKnown("file.storyboard"))
        );
        assert_eq!(FileType::infer("libfoo.a"), Some(FileType::Explicit("archive.ar")));
        assert_eq!(FileType::infer("App.app"), Some(FileType::Explicit("wrapper.application")));
        assert_eq!(FileType::infer("Foo.unknownext"), None);
        assert_eq!(FileType::infer("Foo.C"), None);
    }
}
