//! Entity definitions (database row mappings).

pub mod home;
pub mod join_request;
pub mod leaderboard;
pub mod notification;
pub mod task;
pub mod template;
pub mod user;

pub use home::{
    HomeEntity, HomeMembershipEntity, HomeRoleDb, HomeWithMembershipEntity, MemberStatusDb,
    MemberWithUserEntity,
};
pub use join_request::{
    HomeSearchEntity, JoinRequestEntity, JoinRequestStatusDb, MyJoinRequestEntity,
    PendingJoinRequestEntity,
};
pub use leaderboard::{
    HomePointsEntity, LeaderboardRowEntity, MemberScoreEntity, MonthlyPointsEntity,
    MonthlyWinnerEntity,
};
pub use notification::NotificationEntity;
pub use task::{
    AssignedTaskEntity, AssignmentStatusDb, AssignmentWithTaskEntity, AssignmentWithUserEntity,
    CompletionWithUserEntity, DifficultyDb, TaskAssignmentEntity, TaskEntity, TaskKindDb,
};
pub use template::ChoreTemplateEntity;
pub use user::UserEntity;
