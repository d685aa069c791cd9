// Scheduling login
//
// The CGI takes its form fields as query parameters with a
// form-urlencoded content type on an empty body, and answers a
// successful login with exactly one session cookie. That single cookie
// is the only accepted session-establishment shape — zero or several
// cookies both mean the login did not take.

use reqwest::header::{self, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::calendar::client::{CalendarClient, check_status};
use crate::calendar::models::Session;
use crate::error::Error;

impl CalendarClient {
    /// Authenticate against the scheduling interface.
    ///
    /// `POST agenda/planung/calendar.cgi?user=..&password=..&authAction=login&uri=`
    ///
    /// On success the returned [`Session`] must accompany every upload
    /// of the same run. Logins are idempotent; re-authenticating simply
    /// yields a fresh session.
    pub async fn login(&self, user: &str, password: &SecretString) -> Result<Session, Error> {
        let mut url = self.endpoint_url("agenda/planung/calendar.cgi")?;
        url.query_pairs_mut()
            .append_pair("user", user)
            .append_pair("password", password.expose_secret())
            .append_pair("authAction", "login")
            .append_pair("uri", "");

        // The query string carries the password; log the path only.
        debug!(user, "logging in at {}", url.path());

        let resp = self
            .http()
            .post(url)
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .send()
            .await
            .map_err(Error::Transport)?;

        let resp = check_status(resp)?;

        let mut cookies = resp.headers().get_all(header::SET_COOKIE).iter();
        match (cookies.next(), cookies.next()) {
            (Some(raw), None) => {
                let session = parse_session_cookie(raw)?;
                debug!(cookie = session.name(), "login successful");
                Ok(session)
            }
            (None, _) => Err(Error::Authentication {
                message: "login response carried no session cookie".into(),
            }),
            (Some(_), Some(_)) => Err(Error::Authentication {
                message: "login response carried more than one cookie".into(),
            }),
        }
    }
}

/// Split a `Set-Cookie` header into its name/value pair, discarding
/// attributes (`Path`, `Expires`, ...).
fn parse_session_cookie(raw: &HeaderValue) -> Result<Session, Error> {
    let raw = raw.to_str().map_err(|_| Error::Authentication {
        message: "session cookie is not valid UTF-8".into(),
    })?;
    let pair = raw.split(';').next().unwrap_or(raw);
    let (name, value) = pair.split_once('=').ok_or_else(|| Error::Authentication {
        message: format!("malformed session cookie: {pair:?}"),
    })?;
    Ok(Session::new(name.trim().to_owned(), value.trim().to_owned()))
}
