//! Migration: users, roles, user_roles, user_profiles and guardians.
//!
//! Every child table cascades on delete from `users`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Slug).string_len(255).not_null())
                    .col(ColumnDef::new(Users::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Users::LastName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(150)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Dni).string_len(20).null())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Users::IsGoogleAccount)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(timestamp(Users::CreatedAt))
                    .col(timestamp(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Roles::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Roles::Name)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Roles::Description).string_len(255).null())
                    .col(timestamp(Roles::CreatedAt))
                    .col(timestamp(Roles::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserRoles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserRoles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(UserRoles::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserRoles::RoleId).uuid().not_null())
                    .col(timestamp(UserRoles::CreatedAt))
                    .col(timestamp(UserRoles::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_roles_user")
                            .from(UserRoles::Table, UserRoles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_roles_role")
                            .from(UserRoles::Table, UserRoles::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(UserProfiles::RegistrationDate).date().null())
                    .col(ColumnDef::new(UserProfiles::LastNames).string_len(120).null())
                    .col(ColumnDef::new(UserProfiles::FirstNames).string_len(120).null())
                    .col(ColumnDef::new(UserProfiles::Gender).string_len(1).null())
                    .col(ColumnDef::new(UserProfiles::Age).integer().null())
                    .col(ColumnDef::new(UserProfiles::BirthDate).date().null())
                    .col(ColumnDef::new(UserProfiles::Status).string_len(1).null())
                    .col(ColumnDef::new(UserProfiles::Alias).string_len(80).null())
                    .col(ColumnDef::new(UserProfiles::HasUniform).boolean().null())
                    .col(ColumnDef::new(UserProfiles::ShirtSize).string_len(5).null())
                    .col(ColumnDef::new(UserProfiles::PantsSize).string_len(5).null())
                    .col(ColumnDef::new(UserProfiles::ShoeSize).string_len(5).null())
                    .col(ColumnDef::new(UserProfiles::HeightMeters).double().null())
                    .col(ColumnDef::new(UserProfiles::WeightKg).double().null())
                    .col(
                        ColumnDef::new(UserProfiles::HealthInsurance)
                            .string_len(50)
                            .null(),
                    )
                    .col(ColumnDef::new(UserProfiles::BloodType).string_len(3).null())
                    .col(ColumnDef::new(UserProfiles::Allergies).text().null())
                    .col(
                        ColumnDef::new(UserProfiles::DisabilityOrDisorder)
                            .text()
                            .null(),
                    )
                    .col(ColumnDef::new(UserProfiles::EnrollmentDate).date().null())
                    .col(
                        ColumnDef::new(UserProfiles::CurrentResidence)
                            .string_len(120)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::ProfessionalGoal)
                            .string_len(120)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::FavoriteHero)
                            .string_len(120)
                            .null(),
                    )
                    .col(timestamp(UserProfiles::CreatedAt))
                    .col(timestamp(UserProfiles::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_profiles_user")
                            .from(UserProfiles::Table, UserProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Guardians::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Guardians::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Guardians::UserId).uuid().not_null())
                    .col(ColumnDef::new(Guardians::FullName).string_len(120).not_null())
                    .col(ColumnDef::new(Guardians::Phone).string_len(50).null())
                    .col(ColumnDef::new(Guardians::Email).string_len(120).null())
                    .col(ColumnDef::new(Guardians::ContactType).string_len(50).null())
                    .col(timestamp(Guardians::CreatedAt))
                    .col(timestamp(Guardians::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guardians_user")
                            .from(Guardians::Table, Guardians::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_guardians_user_id")
                    .table(Guardians::Table)
                    .col(Guardians::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Guardians::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserRoles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

fn timestamp<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Slug,
    FirstName,
    LastName,
    Email,
    PasswordHash,
    Dni,
    IsActive,
    IsGoogleAccount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Roles {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum UserRoles {
    Table,
    Id,
    UserId,
    RoleId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum UserProfiles {
    Table,
    Id,
    UserId,
    RegistrationDate,
    LastNames,
    FirstNames,
    Gender,
    Age,
    BirthDate,
    Status,
    Alias,
    HasUniform,
    ShirtSize,
    PantsSize,
    ShoeSize,
    HeightMeters,
    WeightKg,
    HealthInsurance,
    BloodType,
    Allergies,
    DisabilityOrDisorder,
    EnrollmentDate,
    CurrentResidence,
    ProfessionalGoal,
    FavoriteHero,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Guardians {
    Table,
    Id,
    UserId,
    FullName,
    Phone,
    Email,
    ContactType,
    CreatedAt,
    UpdatedAt,
}
