use chrono::{DateTime, Utc};
use juniper::ID;

use crate::common::UserId;
use crate::domains::users::models::{Gender, User};
use crate::server::graphql::context::GraphQLContext;

/// Public view of a user. The password hash is never part of it.
#[derive(Debug, Clone)]
pub struct UserData {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub date_joined: DateTime<Utc>,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            gender: user.gender(),
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            date_joined: user.date_joined,
        }
    }
}

#[juniper::graphql_object(name = "User", Context = GraphQLContext)]
impl UserData {
    fn id(&self) -> ID {
        ID::new(self.id.to_string())
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    fn gender(&self) -> Option<Gender> {
        self.gender
    }

    fn date_joined(&self) -> DateTime<Utc> {
        self.date_joined
    }
}

/// Registration arguments as received, password still in plaintext
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
}

#[derive(Debug, Clone, juniper::GraphQLObject)]
#[graphql(context = GraphQLContext)]
pub struct CreateUserPayload {
    pub user: UserData,
}
