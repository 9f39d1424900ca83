//! Member roster — the consumed collaborator used by audits.
//!
//! Loading the roster from the forum backend is the caller's job; this crate
//! only defines the in-memory shape the audits query: who exists, their
//! phone number on record, and which groups they belong to.

use std::collections::{BTreeMap, BTreeSet};

/// Group whose members may be assigned driver blocks.
pub const DRIVERS_GROUP: &str = "drivers";

/// One roster entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Member {
    pub user_name: String,
    pub phone:     String,
    pub groups:    BTreeSet<String>,
}

impl Member {
    pub fn new(user_name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            phone:     phone.into(),
            groups:    BTreeSet::new(),
        }
    }

    /// Builder-style group membership.
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.groups.insert(group.into());
        self
    }

    pub fn is_in(&self, group: &str) -> bool {
        self.groups.contains(group)
    }
}

/// User name → member lookup.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberRoster {
    members: BTreeMap<String, Member>,
}

impl MemberRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a member, keyed by user name.
    pub fn insert(&mut self, member: Member) {
        self.members.insert(member.user_name.clone(), member);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_member(mut self, member: Member) -> Self {
        self.insert(member);
        self
    }

    pub fn get(&self, user_name: &str) -> Option<&Member> {
        self.members.get(user_name)
    }

    pub fn contains(&self, user_name: &str) -> bool {
        self.members.contains_key(user_name)
    }

    /// `true` if `user_name` is on the roster and in [`DRIVERS_GROUP`].
    pub fn is_driver(&self, user_name: &str) -> bool {
        self.get(user_name).is_some_and(|m| m.is_in(DRIVERS_GROUP))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }
}
