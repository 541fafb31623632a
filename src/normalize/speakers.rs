use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::{Role, SpeakerRegistry};

/// Raw speaker label -> canonical name. An empty value keeps the label as-is.
///
/// Covers transcriber typos, full names and titles used for the same person,
/// and a handful of page-furniture labels that are kept verbatim.
static SPEAKER_ALIASES: &[(&str, &str)] = &[
    (" LOOK BACK", ""),
    (" OPEN GRAPHIC", ""),
    (" OPEN INTERACTIVE GRAPHIC", ""),
    (" OUR ANALYSIS", ""),
    (". COOPER", "COOPER"),
    ("ALEXIS", "KULASH"),
    ("ALEXIS KULASH, DRAKE UNIVERSITY STUDENT", "KULASH"),
    ("ANNOUNCER", ""),
    ("ARNOLD WOODS, PRESIDENT, DES MOINES NAACP", "WOODS"),
    ("ARRARAS", "ARRASAS"),
    ("ARRASAS", ""),
    ("AUDIENCE", ""),
    ("AUDIENCE MEMBER", ""),
    ("BAIER", ""),
    ("BAKER", ""),
    ("BARITROMO", "BARTIROMO"),
    ("BARTIROMO", ""),
    ("BASH", ""),
    ("BERNIE SANDERS", "SANDERS"),
    ("BISHOP", ""),
    ("BLITZER", ""),
    ("BRETT ROSENGREN, STUDENT", "ROSENGREN"),
    ("BROWNLEE", ""),
    ("BUSH", ""),
    ("CARSON", ""),
    ("CAVUTO", ""),
    ("CELESTE", ""),
    ("CHAFEE", ""),
    ("CHRISTIE", ""),
    ("CLINTON", ""),
    ("COLLISON", ""),
    ("COOPER", ""),
    ("CRAMER", ""),
    ("CRAWFORD", ""),
    ("CRUZ", ""),
    ("CRUZ ", "CRUZ"),
    ("CUBA", ""),
    ("CUOMO", ""),
    ("CURZ", "CRUZ"),
    ("DEBORAH PLUMMER", "PLUMMER"),
    (
        "DICK GOODSON, CHAIRMAN, DES MOINES COMMITTEE ON FOREIGN RELATIONS",
        "GOODSON",
    ),
    ("DICKERSON", ""),
    ("DINAN", ""),
    ("ELECTION 2016", ""),
    ("EPPERSON", ""),
    ("FIONNA", "FIORINA"),
    ("FIORINA", ""),
    ("FRANCHESCA RAMSEY", "RAMSEY"),
    ("FRANTA", ""),
    ("FROM OUR ADVERTISERS", ""),
    ("GARRET", "GARRETT"),
    ("GARRETT", ""),
    ("GOODSON", ""),
    ("GRAPHIC", ""),
    ("HAM", ""),
    ("HANNITY", ""),
    ("HARMAN", ""),
    ("HARWOOD", ""),
    ("HEWITT", ""),
    ("HILLARY CLINTON", "CLINTON"),
    ("HOLT", ""),
    ("HUCKABEE", ""),
    ("IFILL", ""),
    ("INTERACTIVE GRAPHIC", ""),
    ("JENNA BISHOP, DRAKE UNIVERSITY LAW SCHOOL STUDENT", "BISHOP"),
    ("JOHN DICKERSON", "DICKERSON"),
    ("JORGE RAMOS", "RAMOS"),
    ("JOSH JACOB, COLLEGE STUDENT", "JACOB"),
    ("JOY LASSEN", "LASSEN"),
    ("JUL 13", ""),
    ("KAISCH", "KASICH"),
    ("KARL", ""),
    ("KASICH", ""),
    ("KATHIE OBRADOVICH", "OBRADOVICH"),
    ("KELLY", ""),
    ("KEVIN COONEY", "COONEY"),
    ("LASSEN", ""),
    ("LEMON", ""),
    ("LEVESQUE", ""),
    ("LIVE COVERAGE", ""),
    ("LOPEZ", ""),
    ("LOUIS", ""),
    ("MADDOW", ""),
    ("MAJOR GARRETT", "GARRETT"),
    ("MALE", ""),
    ("MARTIN O'MALLEY", "O'MALLEY"),
    ("MCELVEEN", ""),
    ("MEGAN", "KELLY"),
    ("MEGYN", "KELLY"),
    ("MEGYN KELLY", "KELLY"),
    ("MILLER", ""),
    ("MITCHELL", ""),
    ("MODERATOR", ""),
    ("MORE", ""),
    ("MUIR", ""),
    ("NANCY CORDES", "CORDES"),
    ("NEWS ANALYSIS", ""),
    ("NEWS CLIPS", ""),
    ("O'CONNOR", ""),
    ("O'MALLEY", ""),
    ("O'REILLY", ""),
    ("O\u{2019}MALLEY", "O'MALLEY"),
    ("PAUL", ""),
    ("PERRY", ""),
    ("PLUMMER", ""),
    ("QUESTION", ""),
    ("QUICK", ""),
    ("QUINTANILLA", ""),
    ("RADDATZ", ""),
    ("RAMOS", ""),
    ("RELATED COVERAGE", ""),
    ("RITCHIE", ""),
    ("ROSENGREN", ""),
    ("RUBIO", ""),
    ("SALINAS", ""),
    ("SANDERFS", "SANDERS"),
    ("SANDERS", ""),
    ("SANTELLI", ""),
    ("SEAN COLLISON", "COLLISON"),
    ("SMITH", ""),
    ("STEPHANOPOULOS", ""),
    ("STRASSEL", ""),
    ("TALKER", ""),
    ("TAPPER", ""),
    ("TAPPER ", "TAPPER"),
    ("TODD", ""),
    ("TRUMO", "TRUMP"),
    ("TRUMP", ""),
    ("TUMULTY", ""),
    ("UNIDENTIFIABLE MALE", ""),
    ("UNIDENTIFIED FEMALE", ""),
    ("UNIDENTIFIED MALE", ""),
    ("WALKER", ""),
    ("WALKRE", "WALKER"),
    ("WALLACE", ""),
    ("WALLCE", "WALLACE"),
    ("WALLLACE", "WALLACE"),
    ("WEBB", ""),
    ("WILKINS", ""),
    ("WOODRUFF", ""),
    ("[ APPLAUSE ]", ""),
    ("\u{2018} QUICK", "QUICK"),
];

/// Canonical name -> role. Anything absent is `Role::Other`.
static SPEAKER_ROLES: &[(&str, Role)] = &[
    // Candidates
    ("BUSH", Role::Candidate),
    ("CARSON", Role::Candidate),
    ("CHAFEE", Role::Candidate),
    ("CHRISTIE", Role::Candidate),
    ("CLINTON", Role::Candidate),
    ("CRUZ", Role::Candidate),
    ("FIORINA", Role::Candidate),
    ("HUCKABEE", Role::Candidate),
    ("KASICH", Role::Candidate),
    ("O'MALLEY", Role::Candidate),
    ("PAUL", Role::Candidate),
    ("PERRY", Role::Candidate),
    ("RUBIO", Role::Candidate),
    ("SANDERS", Role::Candidate),
    ("TRUMP", Role::Candidate),
    ("WALKER", Role::Candidate),
    ("WEBB", Role::Candidate),
    // Moderators and panelists
    ("ARRASAS", Role::Moderator),
    ("BAIER", Role::Moderator),
    ("BAKER", Role::Moderator),
    ("BARTIROMO", Role::Moderator),
    ("BASH", Role::Moderator),
    ("BLITZER", Role::Moderator),
    ("CAVUTO", Role::Moderator),
    ("COOPER", Role::Moderator),
    ("CORDES", Role::Moderator),
    ("COONEY", Role::Moderator),
    ("CRAMER", Role::Moderator),
    ("DICKERSON", Role::Moderator),
    ("GARRETT", Role::Moderator),
    ("HARWOOD", Role::Moderator),
    ("HEWITT", Role::Moderator),
    ("HOLT", Role::Moderator),
    ("IFILL", Role::Moderator),
    ("KELLY", Role::Moderator),
    ("LEMON", Role::Moderator),
    ("LOPEZ", Role::Moderator),
    ("LOUIS", Role::Moderator),
    ("MADDOW", Role::Moderator),
    ("MITCHELL", Role::Moderator),
    ("MODERATOR", Role::Moderator),
    ("MUIR", Role::Moderator),
    ("OBRADOVICH", Role::Moderator),
    ("QUICK", Role::Moderator),
    ("QUINTANILLA", Role::Moderator),
    ("RADDATZ", Role::Moderator),
    ("RAMOS", Role::Moderator),
    ("SALINAS", Role::Moderator),
    ("SANTELLI", Role::Moderator),
    ("STRASSEL", Role::Moderator),
    ("TAPPER", Role::Moderator),
    ("TODD", Role::Moderator),
    ("WALLACE", Role::Moderator),
    ("WOODRUFF", Role::Moderator),
    // Audience members and questioners
    ("AUDIENCE", Role::Audience),
    ("AUDIENCE MEMBER", Role::Audience),
    ("BISHOP", Role::Audience),
    ("GOODSON", Role::Audience),
    ("JACOB", Role::Audience),
    ("KULASH", Role::Audience),
    ("MALE", Role::Audience),
    ("PLUMMER", Role::Audience),
    ("QUESTION", Role::Audience),
    ("ROSENGREN", Role::Audience),
    ("UNIDENTIFIABLE MALE", Role::Audience),
    ("UNIDENTIFIED FEMALE", Role::Audience),
    ("UNIDENTIFIED MALE", Role::Audience),
    ("WOODS", Role::Audience),
];

static ALIAS_INDEX: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| SPEAKER_ALIASES.iter().copied().collect());

static ROLE_INDEX: LazyLock<HashMap<&'static str, Role>> =
    LazyLock::new(|| SPEAKER_ROLES.iter().copied().collect());

/// Characters transcribers leave around labels that never belong to a name
fn is_label_padding(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{200b}' | '\u{200c}' | '\u{200d}' | '\u{feff}')
}

/// Map a raw speaker label to its canonical name
///
/// The label is looked up as written first, then with surrounding whitespace
/// and zero-width characters removed. Unknown labels come back unchanged.
pub fn canonical_name(label: &str) -> String {
    let trimmed = label.trim_matches(is_label_padding);
    for key in [label, trimmed] {
        if let Some(&canonical) = ALIAS_INDEX.get(key) {
            return if canonical.is_empty() {
                key.to_string()
            } else {
                canonical.to_string()
            };
        }
    }
    label.to_string()
}

/// Role of a canonical speaker name
pub fn role_for(name: &str) -> Role {
    ROLE_INDEX.get(name).copied().unwrap_or(Role::Other)
}

/// Whether the alias table knows this exact label
pub fn is_known_label(label: &str) -> bool {
    ALIAS_INDEX.contains_key(label)
}

/// Resolve every speaker label of a transcript into a registry
pub fn normalize_speakers<S: AsRef<str>>(labels: &[S]) -> SpeakerRegistry {
    let mut registry = SpeakerRegistry::new();
    for label in labels {
        let label = label.as_ref();
        let name = canonical_name(label);
        let role = role_for(&name);
        registry.register(label, &name, role);
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typos_map_to_canonical() {
        assert_eq!(canonical_name("TRUMO"), "TRUMP");
        assert_eq!(canonical_name("WALLLACE"), "WALLACE");
        assert_eq!(canonical_name("HILLARY CLINTON"), "CLINTON");
        assert_eq!(canonical_name("MEGYN"), "KELLY");
    }

    #[test]
    fn test_unknown_label_passes_through() {
        assert_eq!(canonical_name("SOMEBODY NEW"), "SOMEBODY NEW");
        assert_eq!(role_for("SOMEBODY NEW"), Role::Other);
    }

    #[test]
    fn test_padded_label_is_trimmed_when_known() {
        assert_eq!(canonical_name("CRUZ "), "CRUZ");
        assert_eq!(canonical_name("\u{200b}\u{200b}CRUZ"), "CRUZ");
        assert_eq!(canonical_name(" RUBIO"), "RUBIO");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for &(_, canonical) in SPEAKER_ALIASES {
            if canonical.is_empty() {
                continue;
            }
            assert_eq!(canonical_name(canonical), canonical, "{canonical} is not stable");
        }
        for &(label, canonical) in SPEAKER_ALIASES {
            if canonical.is_empty() {
                assert_eq!(canonical_name(label), label);
            }
        }
    }

    #[test]
    fn test_roles() {
        assert_eq!(role_for("TRUMP"), Role::Candidate);
        assert_eq!(role_for("KELLY"), Role::Moderator);
        assert_eq!(role_for("UNIDENTIFIED MALE"), Role::Audience);
        assert_eq!(role_for("GRAPHIC"), Role::Other);
    }

    #[test]
    fn test_every_role_key_is_canonical() {
        for &(name, _) in SPEAKER_ROLES {
            assert_eq!(canonical_name(name), name);
        }
    }

    #[test]
    fn test_normalize_speakers_groups_aliases() {
        let registry = normalize_speakers(&["TRUMP", "KELLY", "TRUMO", "MEGYN"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.for_label("MEGYN").unwrap().name, "KELLY");
        assert_eq!(registry.get("TRUMP").unwrap().role, Role::Candidate);
        assert!(is_known_label("TRUMO"));
        assert!(!is_known_label("trump"));
    }
}
