mod email;
mod id;
mod name;
mod profile;
mod username;

pub use self::{email::*, id::*, name::*, profile::*, username::*};
use crate::entity::{Document, Patchable};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

/// Public profile of an account. Secrets live in [`Credential`](crate::entity::Credential)
/// under the same id, so a user body never carries a password hash.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: UserName,
    email: Email,
    username: Username,
    phone: UserPhone,
    date_of_birth: Option<String>,
    gender: Option<String>,
    bio: Option<UserBio>,
    address: Vec<Address>,
    role: Role,
    photo: Photo,
}

impl User {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: UserId,
        name: UserName,
        email: Email,
        username: Username,
        phone: UserPhone,
        date_of_birth: Option<String>,
        gender: Option<String>,
        bio: Option<UserBio>,
        address: Vec<Address>,
        role: Role,
        photo: Photo,
    ) -> Self {
        Self {
            id,
            name,
            email,
            username,
            phone,
            date_of_birth,
            gender,
            bio,
            address,
            role,
            photo,
        }
    }
}

impl Document for User {
    type Id = UserId;
    const COLLECTION: &'static str = "users";

    fn document_id(&self) -> &Self::Id {
        &self.id
    }

    fn unique_keys(&self) -> Vec<String> {
        vec![
            format!("email:{}", self.email.as_ref()),
            format!("username:{}", self.username.as_ref().to_lowercase()),
        ]
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct UserPatch {
    pub name: Option<UserName>,
    pub email: Option<Email>,
    pub username: Option<Username>,
    pub phone: Option<UserPhone>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub bio: Option<UserBio>,
    pub address: Option<Vec<Address>>,
    pub role: Option<Role>,
    pub photo: Option<Photo>,
}

impl Patchable for User {
    type Patch = UserPatch;

    fn patch(&mut self, patch: Self::Patch) -> Vec<&'static str> {
        let mut written = Vec::new();
        if let Some(name) = patch.name {
            self.name = name;
            written.push("name");
        }
        if let Some(email) = patch.email {
            self.email = email;
            written.push("email");
        }
        if let Some(username) = patch.username {
            self.username = username;
            written.push("username");
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
            written.push("phone");
        }
        if let Some(date_of_birth) = patch.date_of_birth {
            self.date_of_birth = Some(date_of_birth);
            written.push("dateOfBirth");
        }
        if let Some(gender) = patch.gender {
            self.gender = Some(gender);
            written.push("gender");
        }
        if let Some(bio) = patch.bio {
            self.bio = Some(bio);
            written.push("bio");
        }
        if let Some(address) = patch.address {
            self.address = address;
            written.push("address");
        }
        if let Some(role) = patch.role {
            self.role = role;
            written.push("role");
        }
        if let Some(photo) = patch.photo {
            self.photo = photo;
            written.push("photo");
        }
        written
    }
}
