use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use kernel::interface::auth::{
    DependOnPasswordHasher, DependOnTokenCodec, PasswordHasher, TokenCodec,
};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{DependOnDocumentQuery, DocumentQuery};
use kernel::interface::update::DependOnDocumentModifier;
use kernel::prelude::descriptor::{QueryDescriptor, ReservedKeys};
use kernel::prelude::entity::{Credential, Email, PlainPassword, User, UserId};
use kernel::{fail, KernelError, KernelErrorExt};

use crate::service::{
    apply_changes, document_not_found, find_document, insert_document, merge_document,
    remove_document,
};
use crate::transfer::{
    AuthenticateDto, AuthenticatedDto, DeleteDocumentDto, LoginDto, SignupDto, UpdateDocumentDto,
    UpdateMeDto, UpdatePasswordDto,
};

const NOT_LOGGED_IN: &str = "You are not logged in! Please log in to get access.";
const USER_GONE: &str = "The user belonging to this token does no longer exist.";
const INCORRECT_LOGIN: &str = "Incorrect email or password.";

fn incorrect_login() -> error_stack::Report<KernelError> {
    fail(KernelError::Validation, INCORRECT_LOGIN)
}

#[async_trait::async_trait]
pub trait SignupService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnDocumentModifier<Connection, User>
    + DependOnDocumentModifier<Connection, Credential>
    + DependOnPasswordHasher
    + DependOnTokenCodec
{
    #[tracing::instrument(skip_all, fields(username = %dto.username))]
    async fn signup(&self, mut dto: SignupDto) -> error_stack::Result<AuthenticatedDto, KernelError> {
        let password = PlainPassword::new(std::mem::take(&mut dto.password), &dto.password_confirm)?;
        let user = dto.into_user(UserId::new(Uuid::new_v4()))?;
        let hash = self.password_hasher().hash(password.as_ref())?;

        let mut connection = self.database_connection().acquire().await?;
        insert_document(self, &mut connection, &user)
            .await
            .map_err(|report| {
                if report.current_context() == &KernelError::Conflict {
                    report.with_message("Email or username is already taken")
                } else {
                    report
                }
            })?;

        let credential = Credential::new(user.id().clone(), hash, None, true);
        if let Err(report) = insert_document(self, &mut connection, &credential).await {
            if let Err(undo) = remove_document::<_, User, _>(self, &mut connection, user.id()).await {
                tracing::error!("user {} left without a credential: {undo:?}", user.id());
            }
            return Err(report);
        }
        tracing::debug!("user {} signed up", user.id());

        let token = self.token_codec().issue(user.id(), *user.role())?;
        Ok(AuthenticatedDto { token, user })
    }
}

impl<Connection: 'static + Send, T> SignupService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnDocumentModifier<Connection, User>
        + DependOnDocumentModifier<Connection, Credential>
        + DependOnPasswordHasher
        + DependOnTokenCodec
{
}

#[async_trait::async_trait]
pub trait LoginService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnDocumentQuery<Connection, User>
    + DependOnDocumentQuery<Connection, Credential>
    + DependOnPasswordHasher
    + DependOnTokenCodec
{
    async fn login(&self, dto: LoginDto) -> error_stack::Result<AuthenticatedDto, KernelError> {
        let (Some(email), Some(password)) = (
            dto.email.filter(|email| !email.is_empty()),
            dto.password.filter(|password| !password.is_empty()),
        ) else {
            return Err(fail(
                KernelError::Validation,
                "Please provide email and password.",
            ));
        };
        let email = Email::new(email).map_err(|_| incorrect_login())?;
        let descriptor = QueryDescriptor::build(
            [("email", email.as_ref().as_str()), ("limit", "1")],
            &ReservedKeys::default(),
        )?;

        let mut connection = self.database_connection().acquire().await?;
        let user = <Self as DependOnDocumentQuery<Connection, User>>::document_query(self)
            .find_many(&mut connection, &descriptor)
            .await?
            .into_iter()
            .next()
            .ok_or_else(incorrect_login)?;
        let credential = find_document::<_, Credential, _>(self, &mut connection, user.id())
            .await?
            .filter(|credential| *credential.active())
            .ok_or_else(incorrect_login)?;
        if !self
            .password_hasher()
            .verify(&password, credential.password())?
        {
            return Err(incorrect_login());
        }

        let token = self.token_codec().issue(user.id(), *user.role())?;
        Ok(AuthenticatedDto { token, user })
    }
}

impl<Connection: 'static + Send, T> LoginService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnDocumentQuery<Connection, User>
        + DependOnDocumentQuery<Connection, Credential>
        + DependOnPasswordHasher
        + DependOnTokenCodec
{
}

#[async_trait::async_trait]
pub trait AuthenticateService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnDocumentQuery<Connection, User>
    + DependOnDocumentQuery<Connection, Credential>
    + DependOnTokenCodec
{
    /// Resolves the bearer of an access token to a live account.
    async fn authenticate(&self, dto: AuthenticateDto) -> error_stack::Result<User, KernelError> {
        let token = dto
            .token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| fail(KernelError::Unauthorized, NOT_LOGGED_IN))?;
        let claims = self.token_codec().verify(&token)?;

        let mut connection = self.database_connection().acquire().await?;
        let user = find_document::<_, User, _>(self, &mut connection, claims.sub())
            .await?
            .ok_or_else(|| fail(KernelError::Unauthorized, USER_GONE))?;
        let credential = find_document::<_, Credential, _>(self, &mut connection, claims.sub())
            .await?
            .filter(|credential| *credential.active())
            .ok_or_else(|| fail(KernelError::Unauthorized, USER_GONE))?;
        if credential.changed_password_after(*claims.iat()) {
            return Err(fail(
                KernelError::Unauthorized,
                "User recently changed password! Please log in again.",
            ));
        }
        Ok(user)
    }
}

impl<Connection: 'static + Send, T> AuthenticateService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnDocumentQuery<Connection, User>
        + DependOnDocumentQuery<Connection, Credential>
        + DependOnTokenCodec
{
}

#[async_trait::async_trait]
pub trait UpdatePasswordService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnDocumentQuery<Connection, User>
    + DependOnDocumentQuery<Connection, Credential>
    + DependOnDocumentModifier<Connection, Credential>
    + DependOnPasswordHasher
    + DependOnTokenCodec
{
    #[tracing::instrument(skip_all, fields(user = %dto.user))]
    async fn update_password(
        &self,
        dto: UpdatePasswordDto,
    ) -> error_stack::Result<AuthenticatedDto, KernelError> {
        let id = UserId::new(dto.user);
        let mut connection = self.database_connection().acquire().await?;
        let user = find_document::<_, User, _>(self, &mut connection, &id)
            .await?
            .ok_or_else(document_not_found)?;
        let credential = find_document::<_, Credential, _>(self, &mut connection, &id)
            .await?
            .ok_or_else(document_not_found)?;
        if !self
            .password_hasher()
            .verify(&dto.password_current, credential.password())?
        {
            return Err(fail(
                KernelError::Validation,
                "Your current password is wrong.",
            ));
        }

        let password = PlainPassword::new(dto.password, &dto.password_confirm)?;
        // Backdated so the token issued below is not already stale.
        let changed_at = OffsetDateTime::now_utc() - Duration::seconds(1);
        let credential = Credential::new(
            id,
            self.password_hasher().hash(password.as_ref())?,
            Some(changed_at),
            *credential.active(),
        );
        if !merge_document(
            self,
            &mut connection,
            &credential,
            &["password", "passwordChangedAt"],
        )
        .await?
        {
            return Err(document_not_found());
        }

        let token = self.token_codec().issue(user.id(), *user.role())?;
        Ok(AuthenticatedDto { token, user })
    }
}

impl<Connection: 'static + Send, T> UpdatePasswordService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnDocumentQuery<Connection, User>
        + DependOnDocumentQuery<Connection, Credential>
        + DependOnDocumentModifier<Connection, Credential>
        + DependOnPasswordHasher
        + DependOnTokenCodec
{
}

#[async_trait::async_trait]
pub trait UpdateMeService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnDocumentQuery<Connection, User>
    + DependOnDocumentModifier<Connection, User>
{
    async fn update_me(&self, dto: UpdateMeDto) -> error_stack::Result<User, KernelError> {
        if dto.mentions_password {
            return Err(fail(
                KernelError::Validation,
                "This route is not for password updates. Please use /updateMyPassword.",
            ));
        }
        let mut changes = dto.changes;
        changes.role = None;
        let mut connection = self.database_connection().acquire().await?;
        apply_changes(
            self,
            &mut connection,
            UpdateDocumentDto {
                id: dto.user,
                changes,
            },
        )
        .await
    }
}

impl<Connection: 'static + Send, T> UpdateMeService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnDocumentQuery<Connection, User>
        + DependOnDocumentModifier<Connection, User>
{
}

#[async_trait::async_trait]
pub trait DeactivateService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnDocumentQuery<Connection, Credential>
    + DependOnDocumentModifier<Connection, Credential>
{
    /// Closes an account without deleting it. The user can no longer log in.
    async fn deactivate(&self, user: Uuid) -> error_stack::Result<(), KernelError> {
        let id = UserId::new(user);
        let mut connection = self.database_connection().acquire().await?;
        let credential = find_document::<_, Credential, _>(self, &mut connection, &id)
            .await?
            .ok_or_else(document_not_found)?;
        let credential = credential.into_destruct();
        let closed = Credential::new(
            credential.id,
            credential.password,
            credential.password_changed_at,
            false,
        );
        if !merge_document(self, &mut connection, &closed, &["active"]).await? {
            return Err(document_not_found());
        }
        tracing::debug!("user {} deactivated", closed.id());
        Ok(())
    }
}

impl<Connection: 'static + Send, T> DeactivateService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnDocumentQuery<Connection, Credential>
        + DependOnDocumentModifier<Connection, Credential>
{
}

#[async_trait::async_trait]
pub trait DeleteUserService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnDocumentModifier<Connection, User>
    + DependOnDocumentModifier<Connection, Credential>
{
    async fn delete_user(&self, dto: DeleteDocumentDto) -> error_stack::Result<(), KernelError> {
        let id = UserId::new(dto.id);
        let mut connection = self.database_connection().acquire().await?;
        remove_document::<_, Credential, _>(self, &mut connection, &id).await?;
        if !remove_document::<_, User, _>(self, &mut connection, &id).await? {
            return Err(document_not_found());
        }
        Ok(())
    }
}

impl<Connection: 'static + Send, T> DeleteUserService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnDocumentModifier<Connection, User>
        + DependOnDocumentModifier<Connection, Credential>
{
}

#[cfg(test)]
mod test {
    use driver::database::InMemoryDatabase;
    use kernel::prelude::entity::{Role, User};
    use kernel::KernelError;

    use crate::service::{
        AuthenticateService, DeactivateService, DeleteUserService, GetDocumentService,
        LoginService, SignupService, UpdateMeService, UpdatePasswordService,
    };
    use crate::transfer::{
        AuthenticateDto, AuthenticatedDto, DeleteDocumentDto, GetDocumentDto, LoginDto, SignupDto,
        UpdateMeDto, UpdatePasswordDto, UpdateUserDto,
    };

    fn signup_dto(email: &str, username: &str) -> SignupDto {
        SignupDto {
            name: "Jane Doe".to_string(),
            email: email.to_string(),
            username: username.to_string(),
            phone: "555-123-4567".to_string(),
            city: Some("Lagos".to_string()),
            password: "pass1234".to_string(),
            password_confirm: "pass1234".to_string(),
            ..SignupDto::default()
        }
    }

    fn login_dto(email: &str, password: &str) -> LoginDto {
        LoginDto {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    async fn signed_up(db: &InMemoryDatabase) -> AuthenticatedDto {
        db.signup(signup_dto("jane@example.com", "janed")).await.unwrap()
    }

    #[tokio::test]
    async fn signup_issues_a_token_for_a_plain_user() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let signed = signed_up(&db).await;
        assert_eq!(signed.user.role(), &Role::User);
        assert_eq!(signed.user.address().len(), 1);

        let bearer = db
            .authenticate(AuthenticateDto {
                token: Some(signed.token),
            })
            .await?;
        assert_eq!(bearer, signed.user);
        Ok(())
    }

    #[tokio::test]
    async fn signup_rejects_mismatched_confirmation_and_duplicates() {
        let db = InMemoryDatabase::default();
        let mut dto = signup_dto("jane@example.com", "janed");
        dto.password_confirm = "pass12345".to_string();
        let report = db.signup(dto).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);

        signed_up(&db).await;
        let report = db
            .signup(signup_dto("JANE@example.com", "other"))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);
    }

    #[tokio::test]
    async fn login_checks_the_password() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let signed = signed_up(&db).await;

        let logged = db.login(login_dto("Jane@Example.com", "pass1234")).await?;
        assert_eq!(logged.user, signed.user);

        let report = db
            .login(login_dto("jane@example.com", "wrongpass"))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);

        let report = db
            .login(LoginDto {
                email: Some("jane@example.com".to_string()),
                password: None,
            })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);
        Ok(())
    }

    #[tokio::test]
    async fn missing_or_forged_tokens_are_unauthorized() {
        let db = InMemoryDatabase::default();
        for token in [None, Some("not-a-token".to_string())] {
            let report = db.authenticate(AuthenticateDto { token }).await.unwrap_err();
            assert_eq!(report.current_context(), &KernelError::Unauthorized);
        }
    }

    #[tokio::test]
    async fn password_change_needs_the_current_one() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let signed = signed_up(&db).await;
        let user = *signed.user.id().as_ref();

        let report = db
            .update_password(UpdatePasswordDto {
                user,
                password_current: "guessing".to_string(),
                password: "newpass99".to_string(),
                password_confirm: "newpass99".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);

        let changed = db
            .update_password(UpdatePasswordDto {
                user,
                password_current: "pass1234".to_string(),
                password: "newpass99".to_string(),
                password_confirm: "newpass99".to_string(),
            })
            .await?;
        db.authenticate(AuthenticateDto {
            token: Some(changed.token),
        })
        .await?;
        assert!(db.login(login_dto("jane@example.com", "pass1234")).await.is_err());
        db.login(login_dto("jane@example.com", "newpass99")).await?;
        Ok(())
    }

    #[tokio::test]
    async fn update_me_refuses_passwords_and_roles() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let signed = signed_up(&db).await;
        let user = *signed.user.id().as_ref();

        let report = db
            .update_me(UpdateMeDto {
                user,
                changes: UpdateUserDto::default(),
                mentions_password: true,
            })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);

        let updated = db
            .update_me(UpdateMeDto {
                user,
                changes: UpdateUserDto {
                    name: Some("Jane Roe".to_string()),
                    role: Some("admin".to_string()),
                    ..UpdateUserDto::default()
                },
                mentions_password: false,
            })
            .await?;
        assert_eq!(updated.name().as_ref(), "Jane Roe");
        assert_eq!(updated.role(), &Role::User);
        Ok(())
    }

    #[tokio::test]
    async fn deactivated_users_cannot_log_in() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let signed = signed_up(&db).await;
        db.deactivate(*signed.user.id().as_ref()).await?;

        let report = db
            .login(login_dto("jane@example.com", "pass1234"))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);
        let report = db
            .authenticate(AuthenticateDto {
                token: Some(signed.token),
            })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Unauthorized);
        Ok(())
    }

    #[tokio::test]
    async fn deleted_users_lose_their_tokens() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let signed = signed_up(&db).await;
        let id = *signed.user.id().as_ref();
        db.delete_user(DeleteDocumentDto { id }).await?;

        let report = db.get_document::<User>(GetDocumentDto { id }).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        let report = db
            .authenticate(AuthenticateDto {
                token: Some(signed.token),
            })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Unauthorized);
        Ok(())
    }
}
