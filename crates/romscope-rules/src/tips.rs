use romscope_types::Category;

/// Remediation tips for categories with well-known fixes.
///
/// Returns an empty slice for categories without curated advice.
pub fn tips_for(category: Category) -> &'static [&'static str] {
    match category {
        Category::DependencyMissing => &[
            "Run 'repo sync --force-sync' to update all repositories",
            "Check if device-specific repositories are properly added to manifest",
            "Verify all proprietary files are extracted with extract-files.sh",
        ],
        Category::KernelError => &[
            "Clean kernel with 'make mrproper' in kernel directory",
            "Check if correct defconfig is being used for your device",
            "Verify device tree source files are present and correct",
        ],
        Category::VendorBlobs => &[
            "Run ./extract-files.sh from device directory",
            "Use adb pull to manually extract missing proprietary files",
            "Check if device is properly rooted for blob extraction",
        ],
        Category::MemorySpace => &[
            "Clean build directory with 'make clean' or 'rm -rf out/'",
            "Increase swap space or use faster storage",
            "Use 'make -j$(nproc)' instead of higher parallel jobs",
        ],
        Category::SepolicyError => &[
            "Update sepolicy rules in device/manufacturer/device/sepolicy/",
            "Check for missing sepolicy entries in system/sepolicy/",
            "Verify contexts and permissions in file_contexts",
        ],
        _ => &[],
    }
}
