//! Shared types for romscope
//!
//! This crate contains the data model used across the romscope crates:
//! the closed set of detection categories, the finding produced for a
//! classified log line, and per-category presentation hints.

use serde::{Deserialize, Serialize};

// ============================================================================
// Categories
// ============================================================================

/// A detection category for ROM build log lines.
///
/// Declaration order is significant: it is the precedence order used by the
/// classifier, most severe / most specific first. The catalog must iterate
/// categories in exactly this order or tie-breaking changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Critical,
    BuildFailed,
    DependencyMissing,
    KernelError,
    VendorBlobs,
    ManifestSync,
    SepolicyError,
    GappsIssues,
    TrebleCompatibility,
    MemorySpace,
    PermissionDenied,
    CompilerError,
    ClangLlvm,
    JackCompilation,
    OtaPackage,
    DeviceSpecific,
    SoongBuild,
    Warning,
    Info,
    SuccessIndicators,
}

impl Category {
    /// All categories in precedence order
    pub const ALL: [Category; 20] = [
        Self::Critical,
        Self::BuildFailed,
        Self::DependencyMissing,
        Self::KernelError,
        Self::VendorBlobs,
        Self::ManifestSync,
        Self::SepolicyError,
        Self::GappsIssues,
        Self::TrebleCompatibility,
        Self::MemorySpace,
        Self::PermissionDenied,
        Self::CompilerError,
        Self::ClangLlvm,
        Self::JackCompilation,
        Self::OtaPackage,
        Self::DeviceSpecific,
        Self::SoongBuild,
        Self::Warning,
        Self::Info,
        Self::SuccessIndicators,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Stable category name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::BuildFailed => "BUILD_FAILED",
            Self::DependencyMissing => "DEPENDENCY_MISSING",
            Self::KernelError => "KERNEL_ERROR",
            Self::VendorBlobs => "VENDOR_BLOBS",
            Self::ManifestSync => "MANIFEST_SYNC",
            Self::SepolicyError => "SEPOLICY_ERROR",
            Self::GappsIssues => "GAPPS_ISSUES",
            Self::TrebleCompatibility => "TREBLE_COMPATIBILITY",
            Self::MemorySpace => "MEMORY_SPACE",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::CompilerError => "COMPILER_ERROR",
            Self::ClangLlvm => "CLANG_LLVM",
            Self::JackCompilation => "JACK_COMPILATION",
            Self::OtaPackage => "OTA_PACKAGE",
            Self::DeviceSpecific => "DEVICE_SPECIFIC",
            Self::SoongBuild => "SOONG_BUILD",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
            Self::SuccessIndicators => "SUCCESS_INDICATORS",
        }
    }

    /// Look up a category by its stable name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == name)
    }

    /// Position in the precedence order (0 = most severe)
    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    /// Display color hint (hex), opaque to the classifier
    pub fn color(&self) -> &'static str {
        match self {
            Self::Critical => "#e17055",
            Self::BuildFailed => "#d63031",
            Self::DependencyMissing => "#fd79a8",
            Self::KernelError => "#e84393",
            Self::VendorBlobs => "#a29bfe",
            Self::ManifestSync => "#00cec9",
            Self::SepolicyError => "#fdcb6e",
            Self::GappsIssues => "#fab1a0",
            Self::TrebleCompatibility => "#00b894",
            Self::MemorySpace => "#e17055",
            Self::PermissionDenied => "#fd79a8",
            Self::CompilerError => "#d63031",
            Self::ClangLlvm => "#a29bfe",
            Self::JackCompilation => "#fd79a8",
            Self::OtaPackage => "#00cec9",
            Self::DeviceSpecific => "#fdcb6e",
            Self::SoongBuild => "#6c5ce7",
            Self::Warning => "#fdcb6e",
            Self::Info => "#74b9ff",
            Self::SuccessIndicators => "#00b894",
        }
    }

    /// Display icon hint, opaque to the classifier
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Critical => "🔥",
            Self::BuildFailed => "💥",
            Self::DependencyMissing => "📦",
            Self::KernelError => "🔧",
            Self::VendorBlobs => "🏭",
            Self::ManifestSync => "🔄",
            Self::SepolicyError => "🔒",
            Self::GappsIssues => "📱",
            Self::TrebleCompatibility => "🌳",
            Self::MemorySpace => "💾",
            Self::PermissionDenied => "🚫",
            Self::CompilerError => "⚡",
            Self::ClangLlvm => "🔨",
            Self::JackCompilation => "☕",
            Self::OtaPackage => "📦",
            Self::DeviceSpecific => "📱",
            Self::SoongBuild => "🏗️",
            Self::Warning => "⚠️",
            Self::Info => "ℹ️",
            Self::SuccessIndicators => "✅",
        }
    }

    /// Fixed human-readable explanation for findings in this category
    pub fn message(&self) -> &'static str {
        match self {
            Self::Critical => "Critical system failure - build process terminated",
            Self::BuildFailed => "Build compilation failed - check dependencies and code",
            Self::DependencyMissing => "Missing dependencies or files - may need to sync sources",
            Self::KernelError => "Kernel compilation issue - check defconfig and device tree",
            Self::VendorBlobs => "Proprietary vendor files missing - run extract-files.sh",
            Self::ManifestSync => "Repository sync issue - check network and manifest",
            Self::SepolicyError => "SELinux policy violation - update sepolicy rules",
            Self::GappsIssues => "Google Apps integration failed - check GApps package compatibility",
            Self::TrebleCompatibility => "Project Treble compatibility issue - check VNDK version",
            Self::MemorySpace => "Insufficient disk space or memory - clean build directory",
            Self::PermissionDenied => "Permission error - check file ownership and access rights",
            Self::CompilerError => "Code compilation error - fix syntax or missing declarations",
            Self::ClangLlvm => "Clang/LLVM toolchain error - check compiler configuration",
            Self::JackCompilation => "Java compilation failed - may need to increase heap size",
            Self::OtaPackage => "Update package creation failed - check signing keys",
            Self::DeviceSpecific => "Device-specific configuration error - check BoardConfig.mk",
            Self::SoongBuild => "Modern build system error - check Android.bp files",
            Self::Warning => "Potential issue identified",
            Self::Info => "Build process information",
            Self::SuccessIndicators => "Build step completed successfully",
        }
    }

    /// Whether findings in this category indicate a failure (as opposed to
    /// warnings, informational output, or success markers)
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::Warning | Self::Info | Self::SuccessIndicators)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render the explanation message for a category name.
///
/// Total over strings: unrecognized names get a generic fallback.
pub fn render_message(name: &str) -> &'static str {
    Category::from_name(name)
        .map(|c| c.message())
        .unwrap_or("Issue detected")
}

// ============================================================================
// Findings
// ============================================================================

/// How a finding was detected
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    /// Matched a higher-precedence, build-specific context pattern
    ContextSpecific,
    /// Matched a category's generic keywords or patterns
    Standard,
}

/// One classified log line
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// 1-based position in the input file
    pub line_number: u64,

    /// Trimmed original line content
    pub raw_text: String,

    /// Matched category
    pub category: Category,

    /// Rendered explanation message
    pub message: String,

    /// Detection origin (diagnostics/testing only)
    pub origin: Origin,
}

impl Finding {
    pub fn new(line_number: u64, raw_text: &str, category: Category, origin: Origin) -> Self {
        Self {
            line_number,
            raw_text: raw_text.to_string(),
            category,
            message: category.message().to_string(),
            origin,
        }
    }
}

// ============================================================================
// Counts
// ============================================================================

/// Finding counts per category, in precedence order
#[derive(Clone, Debug, Default)]
pub struct CategoryCounts {
    counts: [usize; Category::COUNT],
}

impl CategoryCounts {
    pub fn record(&mut self, category: Category) {
        self.counts[category.ordinal()] += 1;
    }

    pub fn get(&self, category: Category) -> usize {
        self.counts[category.ordinal()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Iterate non-zero counts in precedence order
    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        Category::ALL
            .iter()
            .map(|&c| (c, self.get(c)))
            .filter(|&(_, n)| n > 0)
    }
}

impl FromIterator<Category> for CategoryCounts {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut counts = Self::default();
        for category in iter {
            counts.record(category);
        }
        counts
    }
}
