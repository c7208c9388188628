use kernel::prelude::entity::{
    Address, Email, Photo, Role, User, UserBio, UserId, UserName, UserPatch, UserPhone, Username,
};
use kernel::KernelError;
use uuid::Uuid;

use crate::transfer::DocumentChanges;

#[derive(Debug, Clone, Default)]
pub struct SignupDto {
    pub name: String,
    pub email: String,
    pub username: String,
    pub phone: String,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub bio: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub password: String,
    pub password_confirm: String,
}

impl SignupDto {
    /// New accounts always start with [`Role::User`].
    pub(crate) fn into_user(self, id: UserId) -> error_stack::Result<User, KernelError> {
        let address = Address {
            street_address: self.street_address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
        };
        Ok(User::new(
            id,
            UserName::new(self.name)?,
            Email::new(self.email)?,
            Username::new(self.username)?,
            UserPhone::new(self.phone)?,
            self.date_of_birth,
            self.gender,
            self.bio.map(UserBio::new).transpose()?,
            if address.is_blank() {
                Vec::new()
            } else {
                vec![address]
            },
            Role::User,
            Photo::default(),
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginDto {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Raw `Authorization` bearer token, if the request carried one.
#[derive(Debug, Clone, Default)]
pub struct AuthenticateDto {
    pub token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdatePasswordDto {
    pub user: Uuid,
    pub password_current: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUserDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub bio: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub role: Option<String>,
    pub photo: Option<String>,
}

impl DocumentChanges for UpdateUserDto {
    type Document = User;

    fn into_patch(self) -> error_stack::Result<UserPatch, KernelError> {
        let address = Address {
            street_address: self.street_address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
        };
        Ok(UserPatch {
            name: self.name.map(UserName::new).transpose()?,
            email: self.email.map(Email::new).transpose()?,
            username: self.username.map(Username::new).transpose()?,
            phone: self.phone.map(UserPhone::new).transpose()?,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            bio: self.bio.map(UserBio::new).transpose()?,
            address: (!address.is_blank()).then(|| vec![address]),
            role: self.role.map(|role| role.parse::<Role>()).transpose()?,
            photo: self.photo.map(Photo::new),
        })
    }
}

/// Profile changes a user makes to their own account.
#[derive(Debug, Clone)]
pub struct UpdateMeDto {
    pub user: Uuid,
    pub changes: UpdateUserDto,
    /// The request body tried to set `password` or `passwordConfirm`.
    pub mentions_password: bool,
}

#[derive(Debug, Clone)]
pub struct AuthenticatedDto {
    pub token: String,
    pub user: User,
}
