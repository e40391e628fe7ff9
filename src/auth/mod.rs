// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Signed-in user identity.
//!
//! The [`Session`] is the application's authentication provider. It does not
//! authenticate anybody itself; it holds whichever identity was configured or
//! entered on the command line and pushes an [`AppEvent::IdentityChanged`]
//! whenever that identity changes. Components never read the identity from a
//! global, they are handed it through that event.

use std::sync::mpsc::Sender;

use anyhow::Result;

use crate::{events::AppEvent, model::UserId};

pub(crate) trait AuthProvider {
    fn current_user(&self) -> Option<UserId>;
}

pub(crate) struct Session {
    user: Option<UserId>,
    event_tx: Sender<AppEvent>,
}

impl Session {
    pub(crate) fn new(user: Option<UserId>, event_tx: Sender<AppEvent>) -> Self {
        Self { user, event_tx }
    }

    pub(crate) fn sign_in(&mut self, user: UserId) -> Result<()> {
        if self.user.as_ref() == Some(&user) {
            return Ok(());
        }

        tracing::info!(%user, "signed in");
        self.user = Some(user);
        self.publish()
    }

    pub(crate) fn sign_out(&mut self) -> Result<()> {
        if let Some(user) = self.user.take() {
            tracing::info!(%user, "signed out");
            self.publish()?;
        }

        Ok(())
    }

    fn publish(&self) -> Result<()> {
        self.event_tx
            .send(AppEvent::IdentityChanged(self.user.clone()))?;

        Ok(())
    }
}

impl AuthProvider for Session {
    fn current_user(&self) -> Option<UserId> {
        self.user.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    fn identities(rx: &mpsc::Receiver<AppEvent>) -> Vec<Option<UserId>> {
        rx.try_iter()
            .filter_map(|event| match event {
                AppEvent::IdentityChanged(user) => Some(user),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn changes_are_pushed_once_per_transition() {
        let (tx, rx) = mpsc::channel();
        let mut session = Session::new(None, tx);

        session.sign_in(UserId::new("u1")).unwrap();
        session.sign_in(UserId::new("u1")).unwrap();
        session.sign_out().unwrap();
        session.sign_out().unwrap();

        assert_eq!(identities(&rx), vec![Some(UserId::new("u1")), None]);
        assert_eq!(session.current_user(), None);
    }

    #[test]
    fn switching_users_is_a_change() {
        let (tx, rx) = mpsc::channel();
        let mut session = Session::new(Some(UserId::new("u1")), tx);

        session.sign_in(UserId::new("u2")).unwrap();

        assert_eq!(identities(&rx), vec![Some(UserId::new("u2"))]);
        assert_eq!(session.current_user(), Some(UserId::new("u2")));
    }
}
