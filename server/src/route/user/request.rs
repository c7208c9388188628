use application::transfer::{
    LoginDto, SignupDto, UpdateDocumentDto, UpdateMeDto, UpdatePasswordDto, UpdateUserDto,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::controller::Intake;
use crate::request::Transformer;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    name: String,
    email: String,
    username: String,
    phone: String,
    date_of_birth: Option<String>,
    gender: Option<String>,
    bio: Option<String>,
    street_address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip_code: Option<String>,
    password: String,
    password_confirm: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    password_current: String,
    password: String,
    password_confirm: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    name: Option<String>,
    email: Option<String>,
    username: Option<String>,
    phone: Option<String>,
    date_of_birth: Option<String>,
    gender: Option<String>,
    bio: Option<String>,
    street_address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip_code: Option<String>,
    role: Option<String>,
    photo: Option<String>,
    password: Option<Value>,
    password_confirm: Option<Value>,
}

impl UpdateUserRequest {
    fn into_changes(self) -> UpdateUserDto {
        UpdateUserDto {
            name: self.name,
            email: self.email,
            username: self.username,
            phone: self.phone,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            bio: self.bio,
            street_address: self.street_address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            role: self.role,
            photo: self.photo,
        }
    }
}

/// The signed-in user editing their own profile.
#[derive(Debug)]
pub struct UpdateMeRequest {
    user: Uuid,
    body: UpdateUserRequest,
}

impl UpdateMeRequest {
    pub fn new(user: Uuid, body: UpdateUserRequest) -> Self {
        Self { user, body }
    }
}

impl Intake<SignupRequest> for Transformer {
    type To = SignupDto;
    fn emit(&self, input: SignupRequest) -> Self::To {
        SignupDto {
            name: input.name,
            email: input.email,
            username: input.username,
            phone: input.phone,
            date_of_birth: input.date_of_birth,
            gender: input.gender,
            bio: input.bio,
            street_address: input.street_address,
            city: input.city,
            state: input.state,
            zip_code: input.zip_code,
            password: input.password,
            password_confirm: input.password_confirm,
        }
    }
}

impl Intake<LoginRequest> for Transformer {
    type To = LoginDto;
    fn emit(&self, input: LoginRequest) -> Self::To {
        LoginDto {
            email: input.email,
            password: input.password,
        }
    }
}

impl Intake<(Uuid, UpdatePasswordRequest)> for Transformer {
    type To = UpdatePasswordDto;
    fn emit(&self, input: (Uuid, UpdatePasswordRequest)) -> Self::To {
        let (user, input) = input;
        UpdatePasswordDto {
            user,
            password_current: input.password_current,
            password: input.password,
            password_confirm: input.password_confirm,
        }
    }
}

impl Intake<(Uuid, UpdateUserRequest)> for Transformer {
    type To = UpdateDocumentDto<UpdateUserDto>;
    fn emit(&self, input: (Uuid, UpdateUserRequest)) -> Self::To {
        let (id, input) = input;
        UpdateDocumentDto {
            id,
            changes: input.into_changes(),
        }
    }
}

impl Intake<UpdateMeRequest> for Transformer {
    type To = UpdateMeDto;
    fn emit(&self, input: UpdateMeRequest) -> Self::To {
        let mentions_password =
            input.body.password.is_some() || input.body.password_confirm.is_some();
        UpdateMeDto {
            user: input.user,
            changes: input.body.into_changes(),
            mentions_password,
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use uuid::Uuid;

    use super::{UpdateMeRequest, UpdateUserRequest};
    use crate::controller::Intake;
    use crate::request::Transformer;

    fn body(value: serde_json::Value) -> UpdateUserRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn update_me_notices_password_fields() {
        let user = Uuid::new_v4();
        let dto = Transformer.emit(UpdateMeRequest::new(
            user,
            body(json!({"name": "Jane", "passwordConfirm": "x"})),
        ));
        assert!(dto.mentions_password);
        assert_eq!(dto.changes.name.as_deref(), Some("Jane"));

        let dto = Transformer.emit(UpdateMeRequest::new(
            user,
            body(json!({"zipCode": "10001"})),
        ));
        assert!(!dto.mentions_password);
        assert_eq!(dto.changes.zip_code.as_deref(), Some("10001"));
    }
}
