//! Ownership guard for user-owned resources

use common::user::User;

use crate::{
    error::{ApiError, ApiResult},
    models::{favorite::Favorite, history::History},
};

/// A resource owned by exactly one user
pub trait Owned {
    fn owner_id(&self) -> i64;
}

impl Owned for Favorite {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

impl Owned for History {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

/// Client-facing messages for one kind of resource
#[derive(Debug, Clone, Copy)]
pub struct ResourceKind {
    pub not_found: &'static str,
    pub denied: &'static str,
    pub denied_delete: &'static str,
    pub deleted: &'static str,
}

pub const FAVORITE: ResourceKind = ResourceKind {
    not_found: "The requested favorite was not found",
    denied: "You are not allowed to access to the requested resource",
    denied_delete: "You must be the owner of this favorite to delete",
    deleted: "favorite delete",
};

pub const HISTORY: ResourceKind = ResourceKind {
    not_found: "The requested history was not found",
    denied: "You are not allowed to access to the requested resource",
    denied_delete: "You must be the owner of this history to delete",
    deleted: "History delete",
};

/// Which denial message an ownership failure reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
    Delete,
}

/// Unwrap a lookup and check that `caller` owns the resource
pub fn owned_by<T: Owned>(
    found: Option<T>,
    caller: &User,
    kind: ResourceKind,
    access: Access,
) -> ApiResult<T> {
    let resource = found.ok_or(ApiError::NotFound(kind.not_found))?;

    if resource.owner_id() != caller.id {
        let message = match access {
            Access::Read | Access::Write => kind.denied,
            Access::Delete => kind.denied_delete,
        };
        return Err(ApiError::NotOwner(message));
    }

    Ok(resource)
}
