//! Account and auth session storage operations

use chrono::Utc;
use rusqlite::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{
    is_unique_violation, parse_datetime, parse_datetime_opt, parse_role, parse_uuid, OptionalExt,
};
use crate::error::{Error, Result};
use crate::models::{Account, AccountRole, AccountUpdate, AuthSession};

const ACCOUNT_COLUMNS: &str = "id, first_name, last_name, email, password_hash, position, role, is_active, created_at, last_login";

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        password_hash: row.get(4)?,
        position: row.get(5)?,
        role: parse_role(&row.get::<_, String>(6)?)?,
        is_active: row.get(7)?,
        created_at: parse_datetime(&row.get::<_, String>(8)?)?,
        last_login: parse_datetime_opt(row.get::<_, Option<String>>(9)?)?,
    })
}

fn map_unique(err: rusqlite::Error, email: &str) -> Error {
    if is_unique_violation(&err) {
        Error::DuplicateEmail(email.to_string())
    } else {
        Error::Database(err)
    }
}

pub struct AccountStore<'a> {
    conn: &'a Connection,
}

impl<'a> AccountStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new account. A taken email maps to `DuplicateEmail`.
    #[instrument(skip(self, account), fields(account_id = %account.id))]
    pub fn create(&self, account: &Account) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO accounts (id, first_name, last_name, email, password_hash, position, role, is_active, created_at, last_login)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    account.id.to_string(),
                    account.first_name,
                    account.last_name,
                    account.email,
                    account.password_hash,
                    account.position,
                    account.role.as_str(),
                    account.is_active,
                    account.created_at.to_rfc3339(),
                    account.last_login.map(|t| t.to_rfc3339()),
                ],
            )
            .map_err(|e| map_unique(e, &account.email))?;
        Ok(())
    }

    /// Find account by ID, active or not
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?1");
        let account = self
            .conn
            .query_row(&sql, params![id.to_string()], account_from_row)
            .optional()?;
        Ok(account)
    }

    /// Find an active account by email
    #[instrument(skip(self, email))]
    pub fn find_active_by_email(&self, email: &str) -> Result<Option<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = ?1 AND is_active = 1");
        let account = self
            .conn
            .query_row(&sql, params![email], account_from_row)
            .optional()?;
        Ok(account)
    }

    /// Find an employee (any activity state) by ID
    #[instrument(skip(self))]
    pub fn find_employee(&self, id: Uuid) -> Result<Option<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?1 AND role = 'employee'");
        let account = self
            .conn
            .query_row(&sql, params![id.to_string()], account_from_row)
            .optional()?;
        Ok(account)
    }

    /// List active employees ordered by last name, first name
    #[instrument(skip(self))]
    pub fn list_active_employees(&self) -> Result<Vec<Account>> {
        let sql = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts
             WHERE role = 'employee' AND is_active = 1
             ORDER BY last_name, first_name"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let accounts = stmt
            .query_map([], account_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(accounts)
    }

    /// Count active accounts holding the given role
    pub fn count_active(&self, role: AccountRole) -> Result<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM accounts WHERE role = ?1 AND is_active = 1",
            params![role.as_str()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Apply a partial update to an active employee.
    ///
    /// Returns `NotFound` when no active employee has this ID.
    #[instrument(skip(self, update))]
    pub fn update_employee(&self, id: Uuid, update: &AccountUpdate) -> Result<()> {
        let email = update.email.clone().unwrap_or_default();
        let changed = self
            .conn
            .execute(
                "UPDATE accounts SET
                    first_name = COALESCE(?1, first_name),
                    last_name = COALESCE(?2, last_name),
                    email = COALESCE(?3, email),
                    position = COALESCE(?4, position),
                    password_hash = COALESCE(?5, password_hash)
                 WHERE id = ?6 AND role = 'employee' AND is_active = 1",
                params![
                    update.first_name,
                    update.last_name,
                    update.email,
                    update.position,
                    update.password_hash,
                    id.to_string(),
                ],
            )
            .map_err(|e| map_unique(e, &email))?;

        if changed == 0 {
            return Err(Error::NotFound(format!("employee {id}")));
        }
        Ok(())
    }

    /// Soft delete an employee. Returns whether a row was deactivated.
    #[instrument(skip(self))]
    pub fn deactivate_employee(&self, id: Uuid) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE accounts SET is_active = 0 WHERE id = ?1 AND role = 'employee'",
            params![id.to_string()],
        )?;
        Ok(changed > 0)
    }

    /// Update last login time
    pub fn update_last_login(&self, account_id: Uuid) -> Result<()> {
        self.conn.execute(
            "UPDATE accounts SET last_login = ?1 WHERE id = ?2",
            params![Utc::now().to_rfc3339(), account_id.to_string()],
        )?;
        Ok(())
    }

    /// Create an auth session
    #[instrument(skip(self, session), fields(account_id = %session.account_id))]
    pub fn create_session(&self, session: &AuthSession) -> Result<()> {
        self.conn.execute(
            "INSERT INTO auth_sessions (token, account_id, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                session.token,
                session.account_id.to_string(),
                session.created_at.to_rfc3339(),
                session.expires_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Find a non-expired session by token
    #[instrument(skip(self, token))]
    pub fn find_valid_session(&self, token: &str) -> Result<Option<AuthSession>> {
        let now = Utc::now().to_rfc3339();
        let session = self
            .conn
            .query_row(
                "SELECT token, account_id, created_at, expires_at FROM auth_sessions
                 WHERE token = ?1 AND expires_at > ?2",
                params![token, now],
                |row| {
                    Ok(AuthSession {
                        token: row.get(0)?,
                        account_id: parse_uuid(&row.get::<_, String>(1)?)?,
                        created_at: parse_datetime(&row.get::<_, String>(2)?)?,
                        expires_at: parse_datetime(&row.get::<_, String>(3)?)?,
                    })
                },
            )
            .optional()?;
        Ok(session)
    }

    /// Delete a session
    pub fn delete_session(&self, token: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM auth_sessions WHERE token = ?1", params![token])?;
        Ok(())
    }

    /// Delete all sessions for an account
    pub fn delete_account_sessions(&self, account_id: Uuid) -> Result<()> {
        self.conn.execute(
            "DELETE FROM auth_sessions WHERE account_id = ?1",
            params![account_id.to_string()],
        )?;
        Ok(())
    }

    /// Clean up expired sessions
    pub fn cleanup_expired_sessions(&self) -> Result<u64> {
        let count = self.conn.execute(
            "DELETE FROM auth_sessions WHERE expires_at < ?1",
            params![Utc::now().to_rfc3339()],
        )?;
        Ok(count as u64)
    }
}
