//! Account: projects, users, invitations

use super::connect;
use crate::credentials::CredentialDefaults;
use crate::mcp::error::ApiResultExt;
use crate::mcp::params::{AccountParams, InviteUsersParams};
use bluematador_client::{InviteUser, Project, User};
use rmcp::ErrorData as McpError;

// ============================================================================
// list_projects
// ============================================================================

pub struct ListProjectsResult {
    pub projects: Vec<Project>,
}

impl ListProjectsResult {
    pub fn build_message(&self) -> String {
        if self.projects.is_empty() {
            return "No projects found for this account.".to_string();
        }
        let list = self
            .projects
            .iter()
            .map(|project| format!("- {} (ID: {})", project.name, project.id))
            .collect::<Vec<_>>()
            .join("\n");
        format!("Found {} project(s):\n\n{list}", self.projects.len())
    }
}

pub async fn list_projects_impl(
    defaults: &CredentialDefaults,
    params: AccountParams,
) -> Result<ListProjectsResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let projects = ctx
        .client
        .list_projects(&ctx.account_id)
        .await
        .tool_result("list_projects", &ctx.args)?;
    Ok(ListProjectsResult { projects })
}

// ============================================================================
// list_users
// ============================================================================

pub struct ListUsersResult {
    pub users: Vec<User>,
}

impl ListUsersResult {
    pub fn build_message(&self) -> String {
        if self.users.is_empty() {
            return "No users found for this account.".to_string();
        }
        let list = self
            .users
            .iter()
            .map(|user| {
                format!(
                    "- {} {} ({}) - {}",
                    user.first_name,
                    user.last_name,
                    user.email,
                    if user.admin { "Admin" } else { "User" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("Found {} user(s):\n\n{list}", self.users.len())
    }
}

pub async fn list_users_impl(
    defaults: &CredentialDefaults,
    params: AccountParams,
) -> Result<ListUsersResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let response = ctx
        .client
        .list_users(&ctx.account_id)
        .await
        .tool_result("list_users", &ctx.args)?;
    Ok(ListUsersResult {
        users: response.users,
    })
}

// ============================================================================
// invite_users
// ============================================================================

pub struct InviteUsersResult {
    pub account_id: String,
    pub invited: Vec<InviteUser>,
}

impl InviteUsersResult {
    pub fn build_message(&self) -> String {
        let list = self
            .invited
            .iter()
            .map(|user| {
                format!(
                    "- {} ({})",
                    user.email,
                    if user.admin { "Admin" } else { "User" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "Successfully invited {} user(s) to account {}:\n\n{list}\n\nUsers will receive email invitations to set up their accounts.",
            self.invited.len(),
            self.account_id,
        )
    }
}

pub async fn invite_users_impl(
    defaults: &CredentialDefaults,
    params: InviteUsersParams,
) -> Result<InviteUsersResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let invites: Vec<InviteUser> = params
        .users
        .iter()
        .map(|user| InviteUser {
            email: user.email.clone(),
            admin: user.admin,
        })
        .collect();
    ctx.client
        .invite_users(&ctx.account_id, &invites)
        .await
        .tool_result("invite_users", &ctx.args)?;
    Ok(InviteUsersResult {
        account_id: ctx.account_id,
        invited: invites,
    })
}
