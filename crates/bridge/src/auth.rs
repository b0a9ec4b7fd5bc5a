//! Webhook token authentication.

use subtle::{Choice, ConstantTimeEq};

use crate::config::HookConfig;

/// Match a candidate token against the configured hook secrets.
///
/// Every secret is compared in constant time with respect to its
/// content, and every configuration is visited regardless of earlier
/// matches, so comparison time does not reveal how many leading bytes
/// of the candidate were correct. A disabled hook takes the same
/// comparison path as a non-matching one: its disabled flag is folded
/// into the constant-time result instead of branching around the
/// comparison.
///
/// Configurations are visited in declaration order; the first enabled
/// hook whose secret matches wins. Behavior for two enabled hooks
/// sharing a secret is a configuration invariant, not checked here.
#[must_use]
pub fn authenticate<'a>(candidate: &str, hooks: &'a [HookConfig]) -> Option<&'a HookConfig> {
    let mut selected: Option<&HookConfig> = None;
    for hook in hooks {
        let matches = candidate.as_bytes().ct_eq(hook.secret.as_bytes())
            & Choice::from(u8::from(!hook.disabled));
        if bool::from(matches) && selected.is_none() {
            selected = Some(hook);
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hook(id: &str, secret: &str, disabled: bool) -> HookConfig {
        HookConfig {
            id: id.to_string(),
            secret: secret.to_string(),
            team: "ops".to_string(),
            channel: "alerts".to_string(),
            disabled,
        }
    }

    #[test]
    fn test_correct_secret_selects_hook() {
        let hooks = vec![hook("h1", "alpha", false), hook("h2", "beta", false)];
        assert_eq!(authenticate("beta", &hooks).map(|h| h.id.as_str()), Some("h2"));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let hooks = vec![hook("h1", "alpha", false)];
        assert!(authenticate("alphb", &hooks).is_none());
        assert!(authenticate("", &hooks).is_none());
        assert!(authenticate("alpha-but-longer", &hooks).is_none());
    }

    #[test]
    fn test_disabled_hook_never_matches() {
        let hooks = vec![hook("h1", "alpha", true)];
        assert!(authenticate("alpha", &hooks).is_none());
    }

    #[test]
    fn test_first_enabled_match_wins_in_declaration_order() {
        let hooks = vec![
            hook("h1", "alpha", true),
            hook("h2", "alpha", false),
            hook("h3", "alpha", false),
        ];
        assert_eq!(authenticate("alpha", &hooks).map(|h| h.id.as_str()), Some("h2"));
    }

    #[test]
    fn test_empty_hook_set_fails() {
        assert!(authenticate("anything", &[]).is_none());
    }
}
