//! Parses the two archive-list keys out of a Skyrim.ini-shaped file (spec
//! §6): `sResourceArchiveList2=` and `sResourceArchiveList=`, each a
//! comma-space separated list of `.bsa` filenames.

/// Extract archive filenames from both recognized keys, in the order their
/// lines appear, `sResourceArchiveList2` lines before `sResourceArchiveList`
/// lines encountered later — matching a straightforward top-to-bottom scan
/// of the file (spec §6 names both keys without prescribing relative
/// priority beyond "read lines starting with" in file order).
pub fn parse_archive_list(ini_contents: &str) -> Vec<String> {
    let mut archives = Vec::new();
    for line in ini_contents.lines() {
        let trimmed = line.trim();
        let value = trimmed
            .strip_prefix("sResourceArchiveList2=")
            .or_else(|| trimmed.strip_prefix("sResourceArchiveList="));
        if let Some(value) = value {
            for token in value.split(", ") {
                let token = token.trim();
                if !token.is_empty() {
                    archives.push(token.to_string());
                }
            }
        }
    }
    archives
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_comma_space() {
        let ini = "sResourceArchiveList2=Skyrim.bsa, Update.bsa, Dawnguard.bsa\n";
        assert_eq!(
            parse_archive_list(ini),
            vec!["Skyrim.bsa", "Update.bsa", "Dawnguard.bsa"]
        );
    }

    #[test]
    fn reads_both_keys_in_file_order() {
        let ini = "sResourceArchiveList=Skyrim.bsa\nsResourceArchiveList2=Dawnguard.bsa\n";
        assert_eq!(
            parse_archive_list(ini),
            vec!["Skyrim.bsa", "Dawnguard.bsa"]
        );
    }

    #[test]
    fn ignores_unrelated_lines() {
        let ini = "bUseThreadedAI=1\nsResourceArchiveList2=Skyrim.bsa\n";
        assert_eq!(parse_archive_list(ini), vec!["Skyrim.bsa"]);
    }
}
