//! Strategy fingerprints
//!
//! A fingerprint summarises the shape of an action sequence: which kinds of
//! action were taken, in what order, and which way each push pointed.
//! Magnitudes are ignored. Fingerprints must be identical across processes,
//! so they are built on SHA-256 rather than `std::hash`, whose default hasher
//! is randomly seeded.

use pushbox_core::Action;
use sha2::{Digest, Sha256};

/// Maps action sequences to stable fingerprint strings
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyHasher;

impl StrategyHasher {
    /// Hex-encoded SHA-256 of the strategy signature
    pub fn hash(actions: &[Action]) -> String {
        let digest = Sha256::digest(Self::signature(actions).as_bytes());
        hex::encode(digest)
    }

    /// `<action initials>:<force directions>`, e.g. `ppw:RRD`
    pub fn signature(actions: &[Action]) -> String {
        let action_sequence: String = actions.iter().map(action_initial).collect();

        let mut force_pattern = String::new();
        for (fx, fy) in actions.iter().filter_map(Action::force) {
            if fx > 0.0 {
                force_pattern.push('R');
            } else if fx < 0.0 {
                force_pattern.push('L');
            }
            if fy > 0.0 {
                force_pattern.push('D');
            } else if fy < 0.0 {
                force_pattern.push('U');
            }
        }

        format!("{action_sequence}:{force_pattern}")
    }
}

fn action_initial(action: &Action) -> char {
    match action {
        Action::Push { .. } => 'p',
        Action::Barrier { .. } => 'b',
        Action::Wait { .. } => 'w',
        Action::Observe { .. } => 'o',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_push_wait() -> Vec<Action> {
        vec![
            Action::push(0.05, 0.0),
            Action::push(0.05, 0.0),
            Action::Wait { duration: 0.0 },
        ]
    }

    #[test]
    fn test_signature() {
        assert_eq!(StrategyHasher::signature(&push_push_wait()), "ppw:RR");
        assert_eq!(StrategyHasher::signature(&[]), ":");

        let mixed = vec![
            Action::push(-1.0, -2.0),
            Action::Observe {
                focus: Some("goal".into()),
            },
            Action::push(0.0, 3.0),
            Action::Barrier {
                x: 400.0,
                y: 300.0,
                angle: 45.0,
            },
            Action::push(0.0, 0.0),
        ];
        assert_eq!(StrategyHasher::signature(&mixed), "popbp:LUD");
    }

    #[test]
    fn test_same_sequence_same_hash() {
        assert_eq!(
            StrategyHasher::hash(&push_push_wait()),
            StrategyHasher::hash(&push_push_wait())
        );
    }

    #[test]
    fn test_magnitude_does_not_matter() {
        let gentle = vec![Action::push(0.01, -0.01)];
        let hard = vec![Action::push(9.0, -4.0)];
        assert_eq!(StrategyHasher::hash(&gentle), StrategyHasher::hash(&hard));
    }

    #[test]
    fn test_different_sequence_different_hash() {
        let other = vec![
            Action::push(-0.05, 0.0),
            Action::Barrier {
                x: 400.0,
                y: 300.0,
                angle: 45.0,
            },
        ];
        assert_ne!(
            StrategyHasher::hash(&push_push_wait()),
            StrategyHasher::hash(&other)
        );
    }

    #[test]
    fn test_hash_is_fixed_across_runs() {
        assert_eq!(
            StrategyHasher::hash(&push_push_wait()),
            "7edd700b7b8c41eddbcfeeabc9c93bd9df3d29ded73b4c7fa12b76964b513085"
        );
        assert_eq!(
            StrategyHasher::hash(&[]),
            "e7ac0786668e0ff0f02b62bd04f45ff636fd82db63b1104601c975dc005f3a67"
        );
    }
}
