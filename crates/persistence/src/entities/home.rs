//! Home entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::home::{Home, HomeMembership, HomeRole, MemberStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for home_role that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "home_role", rename_all = "lowercase")]
pub enum HomeRoleDb {
    Admin,
    Member,
}

impl From<HomeRoleDb> for HomeRole {
    fn from(db_role: HomeRoleDb) -> Self {
        match db_role {
            HomeRoleDb::Admin => HomeRole::Admin,
            HomeRoleDb::Member => HomeRole::Member,
        }
    }
}

impl From<HomeRole> for HomeRoleDb {
    fn from(role: HomeRole) -> Self {
        match role {
            HomeRole::Admin => HomeRoleDb::Admin,
            HomeRole::Member => HomeRoleDb::Member,
        }
    }
}

/// Database enum for member_status that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "member_status", rename_all = "lowercase")]
pub enum MemberStatusDb {
    Active,
    Paused,
}

impl From<MemberStatusDb> for MemberStatus {
    fn from(db_status: MemberStatusDb) -> Self {
        match db_status {
            MemberStatusDb::Active => MemberStatus::Active,
            MemberStatusDb::Paused => MemberStatus::Paused,
        }
    }
}

impl From<MemberStatus> for MemberStatusDb {
    fn from(status: MemberStatus) -> Self {
        match status {
            MemberStatus::Active => MemberStatusDb::Active,
            MemberStatus::Paused => MemberStatusDb::Paused,
        }
    }
}

/// Database row mapping for the homes table.
#[derive(Debug, Clone, FromRow)]
pub struct HomeEntity {
    pub id: Uuid,
    pub name: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HomeEntity> for Home {
    fn from(entity: HomeEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the home_members table.
#[derive(Debug, Clone, FromRow)]
pub struct HomeMembershipEntity {
    pub id: Uuid,
    pub home_id: Uuid,
    pub user_id: Uuid,
    pub role: HomeRoleDb,
    pub status: MemberStatusDb,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HomeMembershipEntity> for HomeMembership {
    fn from(entity: HomeMembershipEntity) -> Self {
        Self {
            id: entity.id,
            home_id: entity.home_id,
            user_id: entity.user_id,
            role: entity.role.into(),
            status: entity.status.into(),
            joined_at: entity.joined_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Home row joined with the requesting user's membership and member count.
#[derive(Debug, Clone, FromRow)]
pub struct HomeWithMembershipEntity {
    pub id: Uuid,
    pub name: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // Membership fields
    pub role: HomeRoleDb,
    pub status: MemberStatusDb,
    pub joined_at: DateTime<Utc>,
    // Aggregates
    pub member_count: i64,
}

/// Membership row joined with user info, for member listings.
#[derive(Debug, Clone, FromRow)]
pub struct MemberWithUserEntity {
    pub user_id: Uuid,
    pub display_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub role: HomeRoleDb,
    pub status: MemberStatusDb,
    pub joined_at: DateTime<Utc>,
}
