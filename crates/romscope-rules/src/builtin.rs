//! Builtin detection rule tables.
//!
//! One entry per category, in precedence order. Keywords are matched as
//! case-insensitive substrings; patterns are compiled with `(?i)` and
//! searched anywhere in the original-case line.

use romscope_types::Category;

pub(crate) struct CategorySpec {
    pub category: Category,
    pub keywords: &'static [&'static str],
    pub patterns: &'static [&'static str],
}

pub(crate) const CATEGORY_SPECS: &[CategorySpec] = &[
    CategorySpec {
        category: Category::Critical,
        keywords: &[
            "critical", "fatal", "crash", "segfault", "abort", "killed", "terminated",
        ],
        patterns: &[
            r"\bcritical\b",
            r"\bfatal\b",
            r"\bcrash\b",
            r"\bsegfault\b",
            r"killed by signal",
            r"terminated",
            r"abort\(\)",
        ],
    },
    CategorySpec {
        category: Category::BuildFailed,
        keywords: &["build failed", "compilation failed", "make failed", "ninja failed"],
        patterns: &[
            r"build failed",
            r"compilation.*failed",
            r"make.*failed",
            r"ninja.*failed",
            r"build/core.*error",
            r"\[.*FAILED.*\]",
            r"recipe for target.*failed",
            r"Stop\.",
            r"make: \*\*\*",
        ],
    },
    CategorySpec {
        category: Category::DependencyMissing,
        keywords: &["not found", "no such file", "missing", "undefined reference"],
        patterns: &[
            r"No such file or directory",
            r"not found",
            r"missing",
            r"undefined reference",
            r"cannot find",
            r"does not exist",
            r"No rule to make target",
            r"Nothing to be done",
            r"ld: cannot find",
            r"fatal error:.*not found",
        ],
    },
    CategorySpec {
        category: Category::KernelError,
        keywords: &["kernel", "dtb", "defconfig", "zimage", "image.gz"],
        patterns: &[
            r"kernel.*error",
            r"defconfig.*not found",
            r"dtb.*failed",
            r"zImage.*failed",
            r"Image\.gz.*failed",
            r"boot\.img.*failed",
            r"kernel/.*error",
            r"arch/arm.*error",
            r"drivers/.*error",
            r"CONFIG_.*not set",
            r"warning: #warning",
        ],
    },
    CategorySpec {
        category: Category::VendorBlobs,
        keywords: &["proprietary", "vendor", "blobs", "extract-files"],
        patterns: &[
            r"proprietary.*missing",
            r"vendor.*not found",
            r"blobs.*missing",
            r"extract-files.*failed",
            r"proprietary-files\.txt.*error",
            r"vendor/.*not found",
            r"firmware.*missing",
        ],
    },
    CategorySpec {
        category: Category::ManifestSync,
        keywords: &["repo sync", "manifest", "git", "fetch", "checkout"],
        patterns: &[
            r"repo sync.*failed",
            r"manifest.*error",
            r"git.*failed",
            r"fatal: .*git",
            r"error: .*checkout",
            r"Fetching project",
            r"Checking out files",
            r"error: RPC failed",
        ],
    },
    CategorySpec {
        category: Category::SepolicyError,
        keywords: &["sepolicy", "selinux", "policy", "security"],
        patterns: &[
            r"sepolicy.*error",
            r"selinux.*denied",
            r"policy.*failed",
            r"security.*violation",
            r"avc:.*denied",
            r"sepolicy_tests",
            r"neverallow.*violation",
            r"checkpolicy.*failed",
        ],
    },
    CategorySpec {
        category: Category::GappsIssues,
        keywords: &["gapps", "google", "play store", "gsf", "gms"],
        patterns: &[
            r"gapps.*failed",
            r"google.*service.*failed",
            r"play.*store.*error",
            r"gsf.*failed",
            r"gms.*error",
            r"com\.google\..*failed",
            r"GoogleServicesFramework",
            r"Phonesky.*failed",
        ],
    },
    CategorySpec {
        category: Category::TrebleCompatibility,
        keywords: &["treble", "vndk", "vendor interface", "hal"],
        patterns: &[
            r"treble.*error",
            r"vndk.*failed",
            r"vendor.*interface.*error",
            r"hal.*failed",
            r"vintf.*error",
            r"compatibility.*failed",
            r"BOARD_VNDK_VERSION",
            r"system.*as.*root",
        ],
    },
    CategorySpec {
        category: Category::MemorySpace,
        keywords: &["no space", "memory", "disk full", "out of memory"],
        patterns: &[
            r"no space left",
            r"disk.*full",
            r"out of memory",
            r"malloc.*failed",
            r"cannot allocate memory",
            r"virtual memory exhausted",
            r"No space left on device",
            r"Disk quota exceeded",
        ],
    },
    CategorySpec {
        category: Category::PermissionDenied,
        keywords: &["permission denied", "access denied", "not permitted"],
        patterns: &[
            r"permission denied",
            r"access denied",
            r"not permitted",
            r"operation not permitted",
            r"insufficient privileges",
            r"you don't have permission",
            r"sudo.*required",
        ],
    },
    CategorySpec {
        category: Category::CompilerError,
        keywords: &["error:", "undefined", "redefinition", "declaration"],
        patterns: &[
            r"error:.*undeclared",
            r"error:.*undefined",
            r"error:.*redefinition",
            r"error:.*declaration",
            r"error:.*syntax",
            r"error:.*expected",
            r"compilation terminated",
            r"too many errors emitted",
            r"\berror\b.*:\s*\d+",
        ],
    },
    CategorySpec {
        category: Category::ClangLlvm,
        keywords: &["clang", "llvm", "linker", "ld.lld"],
        patterns: &[
            r"clang.*error",
            r"llvm.*error",
            r"ld\.lld.*failed",
            r"linker.*error",
            r"lld.*failed",
            r"clang\+\+.*failed",
            r"undefined symbol",
            r"duplicate symbol",
            r"relocation.*failed",
        ],
    },
    CategorySpec {
        category: Category::JackCompilation,
        keywords: &["jack", "jill", "dex", "r8"],
        patterns: &[
            r"jack.*failed",
            r"jill.*error",
            r"dex.*failed",
            r"r8.*failed",
            r"proguard.*failed",
            r"dx.*failed",
            r"Jack server.*failed",
            r"OutOfMemoryError.*Jack",
        ],
    },
    CategorySpec {
        category: Category::OtaPackage,
        keywords: &["ota", "update", "recovery", "zip"],
        patterns: &[
            r"ota.*failed",
            r"update.*package.*failed",
            r"recovery.*failed",
            r"zip.*alignment.*failed",
            r"signing.*failed",
            r"verification.*failed",
            r"META-INF.*error",
            r"updater-script.*error",
        ],
    },
    CategorySpec {
        category: Category::DeviceSpecific,
        keywords: &["board", "device", "init", "rc file"],
        patterns: &[
            r"BoardConfig.*error",
            r"device.*mk.*error",
            r"init.*rc.*error",
            r"device specific.*failed",
            r"hardware.*not found",
            r"overlay.*failed",
            r"device tree.*error",
        ],
    },
    CategorySpec {
        category: Category::SoongBuild,
        keywords: &["soong", "blueprint", "android.bp"],
        patterns: &[
            r"soong.*failed",
            r"blueprint.*error",
            r"Android\.bp.*error",
            r"soong_ui.*failed",
            r"build system.*error",
            r"bootstrap.*failed",
            r"ninja.*build.*stopped",
        ],
    },
    CategorySpec {
        category: Category::Warning,
        keywords: &["warn", "unable", "cannot", "deprecated", "not found"],
        patterns: &[
            r"\bwarn(?:ing)?\b",
            r"\bcannot\b",
            r"\bdeprecated\b",
            r"note:",
            r"warning:",
            r"deprecated",
        ],
    },
    CategorySpec {
        category: Category::Info,
        keywords: &["info", "notice", "debug", "trace", "building"],
        patterns: &[r"\binfo\b", r"\bnotice\b", r"\bdebug\b", r"Building"],
    },
    CategorySpec {
        category: Category::SuccessIndicators,
        keywords: &["successful", "completed", "finished", "done"],
        patterns: &[
            r"build.*successful",
            r"compilation.*completed",
            r"finished",
            r".*done\.",
            r"Build completed",
            r"Package complete",
        ],
    },
];

/// Stricter, build-specific signatures checked before the generic rules.
/// Held in the same precedence order as the categories they override.
pub(crate) const CONTEXT_SPECS: &[(Category, &[&str])] = &[
    (
        Category::KernelError,
        &[
            r"make.*arch.*arm.*failed",
            r"scripts/dtc.*failed",
            r"drivers.*\.ko.*failed",
        ],
    ),
    (
        Category::VendorBlobs,
        &[
            r"proprietary.*missing.*extract.*sh",
            r"vendor.*img.*not.*found",
            r"system.*extract.*failed",
            r"proprietary-files\.txt.*(not found|missing|error)",
        ],
    ),
    (
        Category::MemorySpace,
        &[
            r"cc1.*out.*of.*memory",
            r"ld.*memory.*exhausted",
            r"ninja.*memory.*allocation",
        ],
    ),
    (
        Category::SoongBuild,
        &[
            r"out/soong.*build.*ninja.*failed",
            r"soong_ui.*Kati.*failed",
            r"combined.*ninja.*files.*failed",
        ],
    ),
];
