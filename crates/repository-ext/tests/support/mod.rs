//! Shared fixtures: an in-memory SQLite database with a `users` table.

#![allow(dead_code)]

use sea_orm::{ConnectionTrait, DatabaseConnection, Schema};

use repository_ext::{DatabaseConfig, Database, Params, QueryRepository, RepositoryExt};

pub mod user {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub age: i32,
        pub email: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Fresh database with an empty `users` table
pub async fn setup() -> Database {
    let db = Database::connect(&DatabaseConfig::single_connection("sqlite::memory:"))
        .await
        .expect("connect to in-memory sqlite");

    let conn = db.connection();
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);
    conn.execute(backend.build(&schema.create_table_from_entity(user::Entity)))
        .await
        .expect("create users table");

    db
}

/// Insert `(name, age, email)` rows in order; ids start at 1
pub async fn seed(conn: &DatabaseConnection, rows: &[(&str, i32, Option<&str>)]) {
    let users = conn.repository::<user::Entity>();
    for &(name, age, email) in rows {
        users
            .raw_execute(
                "INSERT INTO users (name, age, email) VALUES (@name, @age, @email)",
                Params::new()
                    .bind("name", name)
                    .bind("age", age)
                    .bind("email", email.map(str::to_string)),
            )
            .await
            .expect("insert user");
    }
}

/// Database seeded with Ann (5), Bob (30), Cid (18)
pub async fn setup_people() -> Database {
    let db = setup().await;
    seed(
        db.connection(),
        &[
            ("Ann", 5, None),
            ("Bob", 30, Some("bob@example.com")),
            ("Cid", 18, Some("cid@example.com")),
        ],
    )
    .await;
    db
}

pub fn names(users: &[user::Model]) -> Vec<&str> {
    users.iter().map(|u| u.name.as_str()).collect()
}
