//! User profile database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{UserProfile, UserProfileData, UserProfileRecord};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub registration_date: Option<Date>,
    pub last_names: Option<String>,
    pub first_names: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub birth_date: Option<Date>,
    pub status: Option<String>,
    pub alias: Option<String>,
    pub has_uniform: Option<bool>,
    pub shirt_size: Option<String>,
    pub pants_size: Option<String>,
    pub shoe_size: Option<String>,
    pub height_meters: Option<f64>,
    pub weight_kg: Option<f64>,
    pub health_insurance: Option<String>,
    pub blood_type: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub allergies: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub disability_or_disorder: Option<String>,
    pub enrollment_date: Option<Date>,
    pub current_residence: Option<String>,
    pub professional_goal: Option<String>,
    pub favorite_hero: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for UserProfile {
    fn from(model: Model) -> Self {
        UserProfile::reconstruct(UserProfileRecord {
            id: model.id,
            user_id: model.user_id,
            data: UserProfileData {
                registration_date: model.registration_date,
                last_names: model.last_names,
                first_names: model.first_names,
                gender: model.gender,
                age: model.age,
                birth_date: model.birth_date,
                status: model.status,
                alias: model.alias,
                has_uniform: model.has_uniform,
                shirt_size: model.shirt_size,
                pants_size: model.pants_size,
                shoe_size: model.shoe_size,
                height_meters: model.height_meters,
                weight_kg: model.weight_kg,
                health_insurance: model.health_insurance,
                blood_type: model.blood_type,
                allergies: model.allergies,
                disability_or_disorder: model.disability_or_disorder,
                enrollment_date: model.enrollment_date,
                current_residence: model.current_residence,
                professional_goal: model.professional_goal,
                favorite_hero: model.favorite_hero,
            },
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&UserProfile> for ActiveModel {
    fn from(profile: &UserProfile) -> Self {
        let record = profile.to_primitives();
        let data = record.data;
        ActiveModel {
            id: Set(record.id),
            user_id: Set(record.user_id),
            registration_date: Set(data.registration_date),
            last_names: Set(data.last_names),
            first_names: Set(data.first_names),
            gender: Set(data.gender),
            age: Set(data.age),
            birth_date: Set(data.birth_date),
            status: Set(data.status),
            alias: Set(data.alias),
            has_uniform: Set(data.has_uniform),
            shirt_size: Set(data.shirt_size),
            pants_size: Set(data.pants_size),
            shoe_size: Set(data.shoe_size),
            height_meters: Set(data.height_meters),
            weight_kg: Set(data.weight_kg),
            health_insurance: Set(data.health_insurance),
            blood_type: Set(data.blood_type),
            allergies: Set(data.allergies),
            disability_or_disorder: Set(data.disability_or_disorder),
            enrollment_date: Set(data.enrollment_date),
            current_residence: Set(data.current_residence),
            professional_goal: Set(data.professional_goal),
            favorite_hero: Set(data.favorite_hero),
            created_at: Set(record.created_at),
            updated_at: Set(record.updated_at),
        }
    }
}
