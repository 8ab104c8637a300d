use super::teams;
use sea_orm::{entity::prelude::*, QueryOrder};

pub mod constraints {
    pub const PK_USERS: &str = "PK_users";
    pub const FK_USERS_TEAM_NAME: &str = "FK_users_team_name";
    pub const IDX_USERS_TEAM_NAME_IS_ACTIVE: &str = "IDX_users_team_name_is_active";
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Team,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Team => Entity::belongs_to(teams::Entity)
                .from(Column::TeamName)
                .to(teams::Column::Name)
                .into(),
        }
    }
}

impl Related<teams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    #[inline]
    pub fn find_in_team(team_name: &str) -> Select<Entity> {
        Self::find()
            .filter(Column::TeamName.eq(team_name))
            .order_by_asc(Column::Id)
    }

    #[inline]
    pub fn find_active_in_team(team_name: &str) -> Select<Entity> {
        Self::find_in_team(team_name).filter(Column::IsActive.eq(true))
    }
}
