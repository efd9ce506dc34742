//! Session Store
//!
//! Holds the current authenticated identity and is the only way to change
//! it. Observers are notified synchronously after every transition.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{Duration, Utc};
use log::{debug, info, warn};

use crate::backend::{AuthBackend, SignUp};
use crate::domain::{check_password_policy, Identity, ProfileUpdate, Session};
use crate::error::{DomainError, DomainResult};

/// Refresh this long before the access token actually lapses
const REFRESH_MARGIN_SECS: i64 = 60;

/// Persists the session between page loads
pub trait SessionStorage {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session);
    fn clear(&self);
}

/// Storage that forgets everything when dropped
#[derive(Default)]
pub struct MemorySessionStorage {
    slot: RefCell<Option<Session>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            slot: RefCell::new(Some(session)),
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Option<Session> {
        self.slot.borrow().clone()
    }

    fn save(&self, session: &Session) {
        *self.slot.borrow_mut() = Some(session.clone());
    }

    fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}

/// What happened to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// Result of `init`, signed in or not
    InitialSession,
    SignedIn,
    SignedOut,
    /// Same identity, new tokens
    TokenRefreshed,
    UserUpdated,
}

/// Passed to every observer after a transition
#[derive(Debug, Clone, PartialEq)]
pub struct AuthChange {
    pub event: AuthEvent,
    pub identity: Option<Identity>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    /// Account exists but must confirm its email before signing in
    ConfirmationPending(Identity),
    /// Backend confirmed immediately; now signed in
    SignedIn(Identity),
}

/// Handle returned by `subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Rc<dyn Fn(&AuthChange)>;

pub struct SessionStore {
    auth: Rc<dyn AuthBackend>,
    storage: Rc<dyn SessionStorage>,
    current: RefCell<Option<Session>>,
    observers: RefCell<Vec<(SubscriptionId, Observer)>>,
    next_subscription: Cell<u64>,
}

impl SessionStore {
    pub fn new(auth: Rc<dyn AuthBackend>, storage: Rc<dyn SessionStorage>) -> Self {
        Self {
            auth,
            storage,
            current: RefCell::new(None),
            observers: RefCell::new(Vec::new()),
            next_subscription: Cell::new(1),
        }
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.current.borrow().as_ref().map(|s| s.user.clone())
    }

    pub fn current_session(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// The current session with a usable access token.
    ///
    /// Refreshes when the token is expired or about to be. A rejected refresh
    /// signs out; a transport failure leaves the session in place.
    pub async fn active_session(&self) -> DomainResult<Session> {
        let session = self.current_session().ok_or(DomainError::NotSignedIn)?;
        if !session.expires_within(Utc::now(), Duration::seconds(REFRESH_MARGIN_SECS)) {
            return Ok(session);
        }

        debug!("access token for {} expiring, refreshing", session.user.email);
        let result = self.auth.refresh(&session).await;

        // Another call may have refreshed or signed out while this one waited
        let current = self.current_session().ok_or(DomainError::NotSignedIn)?;
        if current.refresh_token != session.refresh_token {
            return Ok(current);
        }

        match result {
            Ok(fresh) => {
                self.establish(fresh.clone());
                self.notify(AuthEvent::TokenRefreshed);
                Ok(fresh)
            }
            Err(e) if e.is_transport() => Err(e),
            Err(e) => {
                warn!("session refresh rejected, signing out: {}", e);
                self.current.borrow_mut().take();
                self.storage.clear();
                self.notify(AuthEvent::SignedOut);
                Err(DomainError::auth("Session expired, please sign in again"))
            }
        }
    }

    pub fn subscribe(&self, observer: impl Fn(&AuthChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.observers.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.observers.borrow_mut().retain(|(sid, _)| *sid != id);
    }

    /// Restore a stored session, if any
    pub async fn init(&self) -> Option<Identity> {
        if let Some(stored) = self.storage.load() {
            match self.auth.refresh(&stored).await {
                Ok(session) => {
                    info!("session restored for {}", session.user.email);
                    self.establish(session);
                }
                Err(e) if e.is_transport() => {
                    warn!("could not reach backend to restore session, keeping it: {}", e);
                    *self.current.borrow_mut() = Some(stored);
                }
                Err(e) => {
                    warn!("stored session rejected: {}", e);
                    self.storage.clear();
                    self.current.borrow_mut().take();
                }
            }
        }
        self.notify(AuthEvent::InitialSession);
        self.current_identity()
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> DomainResult<Identity> {
        let session = self.auth.sign_in(email.trim(), password).await?;
        let identity = session.user.clone();
        info!("signed in as {}", identity.email);
        self.establish(session);
        self.notify(AuthEvent::SignedIn);
        Ok(identity)
    }

    pub async fn sign_up(&self, email: &str, password: &str, name: &str) -> DomainResult<SignUpOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Please enter your name"));
        }
        check_password_policy(password)?;

        match self.auth.sign_up(email.trim(), password, name).await? {
            SignUp::Pending(identity) => {
                info!("account created for {}, confirmation pending", identity.email);
                Ok(SignUpOutcome::ConfirmationPending(identity))
            }
            SignUp::Session(session) => {
                let identity = session.user.clone();
                info!("account created and signed in as {}", identity.email);
                self.establish(session);
                self.notify(AuthEvent::SignedIn);
                Ok(SignUpOutcome::SignedIn(identity))
            }
        }
    }

    /// Always ends signed out; remote revocation is best effort
    pub async fn sign_out(&self) {
        let previous = self.current.borrow_mut().take();
        self.storage.clear();
        if let Some(session) = previous {
            if let Err(e) = self.auth.sign_out(&session).await {
                warn!("remote sign out failed: {}", e);
            }
            info!("signed out {}", session.user.email);
        }
        self.notify(AuthEvent::SignedOut);
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> DomainResult<Identity> {
        let session = self.current_session().ok_or(DomainError::NotSignedIn)?;
        let changes = update.into_changes(&session.user)?;
        let identity = self.auth.update_user(&session, &changes).await?;

        let updated = {
            let mut current = self.current.borrow_mut();
            match current.as_mut() {
                // Signed out while the request was in flight
                None => None,
                Some(active) => {
                    active.user = identity.clone();
                    Some(active.clone())
                }
            }
        };
        if let Some(session) = updated {
            self.storage.save(&session);
            self.notify(AuthEvent::UserUpdated);
        }
        Ok(identity)
    }

    /// Reports success whether or not the address has an account.
    pub async fn request_password_reset(&self, email: &str, redirect_to: Option<&str>) -> DomainResult<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(DomainError::validation("Please enter your email address"));
        }
        match self.auth.request_password_reset(email, redirect_to).await {
            Err(e) if e.is_transport() => Err(e),
            Err(e) => {
                warn!("password reset request rejected: {}", e);
                Ok(())
            }
            Ok(()) => Ok(()),
        }
    }

    fn establish(&self, session: Session) {
        self.storage.save(&session);
        *self.current.borrow_mut() = Some(session);
    }

    fn notify(&self, event: AuthEvent) {
        let change = AuthChange {
            event,
            identity: self.current_identity(),
        };
        // Snapshot so observers may subscribe or unsubscribe while being called
        let observers: Vec<Observer> = self.observers.borrow().iter().map(|(_, o)| o.clone()).collect();
        for observer in observers {
            observer(&change);
        }
    }
}
