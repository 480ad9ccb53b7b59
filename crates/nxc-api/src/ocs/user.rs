use crate::client::{encode_segment, Api, OCS_CLOUD};
use crate::config::Credentials;
use crate::error::NextcloudResult;
use crate::ocs::with_meta;
use crate::transport::{ApiRequest, Verb};
use nxc_core::translate::{texts, translate_single};
use nxc_core::{extract_meta, Meta, Siblings, User, WithMeta};

// ── Users ────────────────────────────────────────────────────────────────────

/// User provisioning (`cloud/users`).
#[derive(Debug, Clone)]
pub struct Users {
    api: Api,
}

impl Users {
    pub fn with_session(api: &Api) -> Self {
        Self {
            api: api.rebase(OCS_CLOUD),
        }
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            api: Api::new(credentials, OCS_CLOUD),
        }
    }

    pub fn user(&self, userid: &str) -> UserScope {
        UserScope {
            api: self.api.clone(),
            userid: userid.to_string(),
        }
    }

    pub async fn find(&self, userid: &str) -> NextcloudResult<WithMeta<User>> {
        let doc = self
            .api
            .request(self.api.build(Verb::Get, &format!("/users/{}", encode_segment(userid))))
            .await?;
        let user = translate_single(&doc, Siblings::Elements("ocs/data")).unwrap_or_default();
        Ok(with_meta(&doc, user))
    }

    /// Every user id on the instance.
    pub async fn all(&self) -> NextcloudResult<WithMeta<Vec<User>>> {
        let doc = self.api.request(self.api.build(Verb::Get, "/users")).await?;
        let users = texts(&doc, "users/element").into_iter().map(User::with_id).collect();
        Ok(with_meta(&doc, users))
    }

    pub async fn create(&self, userid: &str, password: &str) -> NextcloudResult<Meta> {
        let req = self
            .api
            .build(Verb::Post, "/users")
            .form("userid", userid)
            .form("password", password);
        self.meta_of(req).await
    }

    /// `key` is one of `email`, `quota`, `displayname`, `phone`, `address`,
    /// `website`, `twitter` or `password`.
    pub async fn update(&self, userid: &str, key: &str, value: &str) -> NextcloudResult<Meta> {
        let req = self
            .api
            .build(Verb::Put, &format!("/users/{}", encode_segment(userid)))
            .form("key", key)
            .form("value", value);
        self.meta_of(req).await
    }

    pub async fn disable(&self, userid: &str) -> NextcloudResult<Meta> {
        let req = self.api.build(Verb::Put, &format!("/users/{}/disable", encode_segment(userid)));
        self.meta_of(req).await
    }

    pub async fn enable(&self, userid: &str) -> NextcloudResult<Meta> {
        let req = self.api.build(Verb::Put, &format!("/users/{}/enable", encode_segment(userid)));
        self.meta_of(req).await
    }

    pub async fn destroy(&self, userid: &str) -> NextcloudResult<Meta> {
        let req = self.api.build(Verb::Delete, &format!("/users/{}", encode_segment(userid)));
        self.meta_of(req).await
    }

    pub async fn resend_welcome(&self, userid: &str) -> NextcloudResult<Meta> {
        let req = self.api.build(Verb::Post, &format!("/users/{}/welcome", encode_segment(userid)));
        self.meta_of(req).await
    }

    async fn meta_of(&self, req: ApiRequest) -> NextcloudResult<Meta> {
        Ok(extract_meta(&self.api.request(req).await?))
    }
}

// ── One user ─────────────────────────────────────────────────────────────────

/// Operations on the groups of a single user.
#[derive(Debug, Clone)]
pub struct UserScope {
    api: Api,
    userid: String,
}

impl UserScope {
    pub fn userid(&self) -> &str {
        &self.userid
    }

    fn path(&self, suffix: &str) -> String {
        format!("/users/{}{}", encode_segment(&self.userid), suffix)
    }

    pub async fn groups(&self) -> NextcloudResult<WithMeta<Vec<String>>> {
        let doc = self.api.request(self.api.build(Verb::Get, &self.path("/groups"))).await?;
        Ok(with_meta(&doc, texts(&doc, "data/groups/element")))
    }

    pub async fn subadmin_groups(&self) -> NextcloudResult<WithMeta<Vec<String>>> {
        let doc = self.api.request(self.api.build(Verb::Get, &self.path("/subadmins"))).await?;
        Ok(with_meta(&doc, texts(&doc, "data/element")))
    }

    pub fn memberships(&self) -> UserGroups {
        UserGroups { scope: self.clone() }
    }
}

/// Group membership and sub-admin rights of one user.
#[derive(Debug, Clone)]
pub struct UserGroups {
    scope: UserScope,
}

impl UserGroups {
    async fn send(&self, verb: Verb, suffix: &str, groupid: &str) -> NextcloudResult<Meta> {
        let api = &self.scope.api;
        let req = api.build(verb, &self.scope.path(suffix)).form("groupid", groupid);
        Ok(extract_meta(&api.request(req).await?))
    }

    pub async fn add(&self, groupid: &str) -> NextcloudResult<Meta> {
        self.send(Verb::Post, "/groups", groupid).await
    }

    pub async fn remove(&self, groupid: &str) -> NextcloudResult<Meta> {
        self.send(Verb::Delete, "/groups", groupid).await
    }

    /// Make the user a sub-admin of `groupid`.
    pub async fn promote(&self, groupid: &str) -> NextcloudResult<Meta> {
        self.send(Verb::Post, "/subadmins", groupid).await
    }

    pub async fn demote(&self, groupid: &str) -> NextcloudResult<Meta> {
        self.send(Verb::Delete, "/subadmins", groupid).await
    }
}
