// ABOUTME: Wizard controller tracking the current page and driving the view
// Skips pages whose visibility rule fails, and starts account verification when
// the account page is left

use thiserror::Error;
use tracing::{debug, info};

use super::page::{fields, ids, FeatureFlags, Page};
use super::settings::WizardSettings;
use super::verify::{Credentials, VerificationDispatcher, VerificationResponse};
use super::view::WizardView;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WizardError {
    #[error("Wizard needs at least one page")]
    NoPages,

    #[error("Duplicate page id: {0}")]
    DuplicatePage(String),
}

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn offset(self) -> isize {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// One wizard session
pub struct WizardController<V, D> {
    pages: Vec<Page>,
    index: usize,
    flags: FeatureFlags,
    verified: bool,
    view: V,
    dispatcher: D,
}

impl<V: WizardView, D: VerificationDispatcher> WizardController<V, D> {
    pub fn new(pages: Vec<Page>, flags: FeatureFlags, view: V, dispatcher: D) -> Result<Self, WizardError> {
        if pages.is_empty() {
            return Err(WizardError::NoPages);
        }
        for (i, page) in pages.iter().enumerate() {
            if pages[..i].iter().any(|p| p.id == page.id) {
                return Err(WizardError::DuplicatePage(page.id.clone()));
            }
        }

        Ok(Self {
            pages,
            index: 0,
            flags,
            verified: false,
            view,
            dispatcher,
        })
    }

    /// Show the first page
    pub fn init(&mut self) {
        self.render(self.index);
    }

    /// Index the wizard would move to in `direction`.
    ///
    /// Walks past pages whose visibility rule fails. If no visible page remains before
    /// the end of the list, the current index is returned.
    pub fn advance(&self, direction: Direction) -> usize {
        let mut candidate = self.index;

        for _ in 0..self.pages.len() {
            let Some(next) = candidate.checked_add_signed(direction.offset()) else {
                break;
            };
            if next >= self.pages.len() {
                break;
            }
            candidate = next;
            if self.is_page_visible(candidate) {
                return candidate;
            }
        }

        self.index
    }

    /// Show the panel at `index` and hide every other one
    pub fn render(&mut self, index: usize) {
        for (i, page) in self.pages.iter().enumerate() {
            let active = i == index;
            if active {
                self.view.show(&page.id);
            } else {
                self.view.hide(&page.id);
            }

            for control in page.controls.iter().filter(|c| c.is_selector()) {
                self.view.set_selector_active(&control.id, active);
            }
        }
    }

    pub fn next(&mut self) -> usize {
        self.navigate(Direction::Forward)
    }

    pub fn previous(&mut self) -> usize {
        self.navigate(Direction::Backward)
    }

    fn navigate(&mut self, direction: Direction) -> usize {
        if self.current_page().id == ids::SQN {
            self.trigger_verification();
        }

        let from = self.index;
        self.index = self.advance(direction);
        self.render(self.index);

        debug!(
            "Wizard page {} -> {} ({})",
            from,
            self.index,
            self.current_page().id
        );
        self.index
    }

    /// Start account verification with the credentials currently in the view.
    ///
    /// Returns false when either credential field is missing.
    pub fn trigger_verification(&mut self) -> bool {
        let (Some(email), Some(password)) = (
            self.view.field_value(fields::SN_EMAIL),
            self.view.field_value(fields::SN_PASSWORD),
        ) else {
            debug!("Account fields missing, skipping verification");
            return false;
        };

        self.view.set_status("");
        info!("Starting account verification for {}", email);
        self.dispatcher.dispatch(Credentials { email, password });
        true
    }

    /// Apply a verification reply. Replies are applied in arrival order, stale or not.
    pub fn apply_verification(&mut self, response: &VerificationResponse) {
        self.view.set_status(&response.message);
        self.verified = response.is_verified();
        info!("Account verification applied, verified = {}", self.verified);
    }

    /// Collect the whole form for submission
    pub fn finish(&self) -> WizardSettings {
        WizardSettings::collect(&self.pages, &self.view, self.verified)
    }

    pub fn is_page_visible(&self, index: usize) -> bool {
        self.pages
            .get(index)
            .is_some_and(|page| page.visibility.is_visible(&self.view, &self.flags))
    }

    /// Pages that currently take part in navigation, in order
    pub fn visible_pages(&self) -> Vec<&Page> {
        (0..self.pages.len())
            .filter(|&i| self.is_page_visible(i))
            .map(|i| &self.pages[i])
            .collect()
    }

    pub fn can_go_back(&self) -> bool {
        self.advance(Direction::Backward) != self.index
    }

    /// No visible page after the current one
    pub fn is_final_page(&self) -> bool {
        self.advance(Direction::Forward) == self.index
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_page(&self) -> &Page {
        &self.pages[self.index]
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }
}
