/// Marker emerge prints in front of every package it would merge.
pub(crate) const EMERGE_ACTION_MARKER: &str = "[ebuild";

/// Suffix `apt list --upgradable` prints after every installed package that
/// has a newer candidate.
pub(crate) const APT_UPGRADABLE_MARKER: &str = "[upgradable from:";

/// Counts upgradable packages in `apt list --upgradable` output.
///
/// Held, phased and kept-back packages are listed too, so they count.
pub(crate) fn count_apt_upgradable(output: &str) -> u32 {
    output
        .lines()
        .filter(|line| line.contains(APT_UPGRADABLE_MARKER))
        .count() as u32
}

/// Counts pending merges in `emerge --pretend` output.
pub(crate) fn count_emerge_actions(output: &str) -> u32 {
    strip_ansi_codes(output)
        .lines()
        .filter(|line| line.starts_with(EMERGE_ACTION_MARKER))
        .count() as u32
}

pub(crate) fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\r' {
            continue;
        }
        if ch == '\u{1b}' {
            if matches!(chars.peek(), Some('[')) {
                chars.next();
                for next in chars.by_ref() {
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
        } else {
            result.push(ch);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const APT_LIST: &str = "\
Listing...
curl/stable-security 7.88.1-10+deb12u6 amd64 [upgradable from: 7.88.1-10+deb12u5]
firefox/jammy-updates 128.0+build2-0ubuntu0.22.04.1 amd64 [upgradable from: 127.0.2+build1-0ubuntu0.22.04.1]
libssl3/jammy-updates 3.0.2-0ubuntu1.16 amd64 [upgradable from: 3.0.2-0ubuntu1.15]
linux-image-amd64/stable-security 6.1.90-1 amd64 [upgradable from: 6.1.85-1]
";

    #[test]
    fn apt_counts_every_upgradable_package() {
        assert_eq!(count_apt_upgradable(APT_LIST), 4);
    }

    #[test]
    fn apt_counts_held_and_kept_back_packages() {
        // firefox is held and libssl3 is phased; dist-upgrade would keep both back.
        let output = "\
Listing...
firefox/jammy-updates 128.0+build2-0ubuntu0.22.04.1 amd64 [upgradable from: 127.0.2+build1-0ubuntu0.22.04.1]
libssl3/jammy-updates 3.0.2-0ubuntu1.16 amd64 [upgradable from: 3.0.2-0ubuntu1.15]
";
        assert_eq!(count_apt_upgradable(output), 2);
    }

    #[test]
    fn apt_up_to_date_host_counts_zero() {
        assert_eq!(count_apt_upgradable("Listing...\n"), 0);
        assert_eq!(count_apt_upgradable(""), 0);
    }

    #[test]
    fn apt_ignores_cli_stability_warning() {
        let output = "\
WARNING: apt does not have a stable CLI interface. Use with caution in scripts.

Listing...
curl/stable-security 7.88.1-10+deb12u6 amd64 [upgradable from: 7.88.1-10+deb12u5]
";
        assert_eq!(count_apt_upgradable(output), 1);
    }

    #[test]
    fn emerge_counts_ebuild_lines() {
        let output = "\
These are the packages that would be merged, in order:

Calculating dependencies... done!
[ebuild     U  ] sys-libs/glibc-2.39-r6::gentoo [2.39-r3::gentoo] USE=\"-audit\" 18,312 KiB
[ebuild   R    ] media-libs/mesa-24.1.3::gentoo  USE=\"llvm*\" 0 KiB
[binary     U  ] app-misc/screen-4.9.1::gentoo [4.9.0::gentoo] 0 KiB
[ebuild  N     ] dev-libs/foo-1.0::gentoo  0 KiB
[blocks b      ] sys-apps/bar (\"sys-apps/bar\" is soft blocking sys-apps/baz-1)

Total: 3 packages (1 upgrade, 1 new, 1 reinstall), Size of downloads: 18,312 KiB
";
        assert_eq!(count_emerge_actions(output), 3);
    }

    #[test]
    fn emerge_marker_must_start_the_line() {
        assert_eq!(count_emerge_actions("  [ebuild     U  ] indented\n"), 0);
        assert_eq!(count_emerge_actions("\n"), 0);
    }

    #[test]
    fn emerge_counts_colored_output() {
        let output = "\u{1b}[32m[ebuild\u{1b}[0m     U  ] sys-libs/zlib-1.3.1\r\n";
        assert_eq!(count_emerge_actions(output), 1);
    }

    #[test]
    fn strip_ansi_codes_removes_escape_sequences() {
        assert_eq!(strip_ansi_codes("\u{1b}[1;31mred\u{1b}[0m\r"), "red");
        assert_eq!(strip_ansi_codes("plain"), "plain");
    }
}
