use serde::{Deserialize, Serialize};

/// Privilege level within an organization (and, for `SuperAdmin`, site-wide).
/// The ordering is total and fixed: Guest < User < Admin < SuperAdmin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Guest,
    User,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Rank in the fixed total order. Read-only table, safe to share across threads.
    pub fn rank(self) -> u8 {
        match self {
            Role::Guest => 0,
            Role::User => 1,
            Role::Admin => 2,
            Role::SuperAdmin => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::User => "user",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    /// Parse a stored role string. Unrecognized values map to `None`, which the
    /// ordering predicates treat as "not satisfied" rather than an error.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "guest" => Some(Role::Guest),
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            "super_admin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True iff `have` is a recognized role whose rank is >= the rank of `want`.
///
/// Requiring nothing (`want == None`) is always satisfied; an absent or
/// unrecognized `have` never satisfies a concrete requirement. Total predicate,
/// never errors.
pub fn is_role_at_least(have: Option<Role>, want: Option<Role>) -> bool {
    match want {
        None => true,
        Some(want) => have.is_some_and(|have| have.rank() >= want.rank()),
    }
}

/// True iff `have` does not exceed `cap`. Defined as the complement ordering
/// check over the same rank table.
pub fn is_role_at_most(have: Option<Role>, cap: Option<Role>) -> bool {
    is_role_at_least(cap, have)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Role; 4] = [Role::Guest, Role::User, Role::Admin, Role::SuperAdmin];

    #[test]
    fn every_role_is_at_least_itself() {
        for role in ALL {
            assert!(is_role_at_least(Some(role), Some(role)), "{role} >= {role}");
        }
    }

    #[test]
    fn order_is_total_and_strict() {
        for a in ALL {
            for b in ALL {
                let ab = is_role_at_least(Some(a), Some(b));
                let ba = is_role_at_least(Some(b), Some(a));
                // At least one direction always holds in a total order
                assert!(ab || ba, "{a} vs {b}");
                // Exactly one direction failing implies strict ordering
                if !ab {
                    assert!(ba && a.rank() < b.rank());
                }
            }
        }
    }

    #[test]
    fn undefined_have_never_satisfies() {
        for role in ALL {
            assert!(!is_role_at_least(None, Some(role)));
        }
    }

    #[test]
    fn undefined_want_is_always_satisfied() {
        // Requiring nothing is always satisfied; note the asymmetry with the
        // undefined-have case above.
        for role in ALL {
            assert!(is_role_at_least(Some(role), None));
        }
        assert!(is_role_at_least(None, None));
    }

    #[test]
    fn at_most_is_the_complement_check() {
        assert!(is_role_at_most(Some(Role::User), Some(Role::Admin)));
        assert!(is_role_at_most(Some(Role::Admin), Some(Role::Admin)));
        assert!(!is_role_at_most(Some(Role::SuperAdmin), Some(Role::Admin)));
        // An inviter with no role in the org caps everything out
        assert!(!is_role_at_most(Some(Role::Guest), None));
    }

    #[test]
    fn parse_round_trips_and_rejects_unknown() {
        for role in ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("owner"), None);
        assert_eq!(Role::parse(""), None);
    }
}
