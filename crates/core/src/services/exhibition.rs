//! Exhibition ticket service.
//!
//! Tickets are per-user grouping records keyed on
//! `(user_id, name, visit_date)`. Posts that name the same exhibition on
//! the same date land on the same ticket; the first post to arrive
//! becomes the ticket's representative (its cover image).

use imery_common::{AppError, AppResult, IdGenerator, TicketColor};
use imery_db::entities::{exhibition, post};
use imery_db::repositories::{
    ExhibitionChanges, ExhibitionRepository, NewExhibitionRecord, PostRepository,
};
use tracing::debug;

use crate::services::visit_date::normalize_visit_date;

/// Partial metadata update for a ticket.
///
/// Every field is a presence marker: `None` means "leave unchanged",
/// `Some` means "replace". Grouping-key fields are deliberately absent;
/// a ticket's membership key never changes after creation.
#[derive(Debug, Clone, Default)]
pub struct ExhibitionUpdate {
    /// Owner's review text.
    pub review: Option<String>,
    /// Ticket background color (`#RRGGBB`).
    pub bg_color: Option<String>,
    /// Cover post reassignment.
    pub representative_post_id: Option<String>,
    /// Director credit.
    pub director: Option<String>,
    /// Cast credit.
    pub cast_members: Option<String>,
    /// Visit time label.
    pub visit_time: Option<String>,
}

/// Representative post fields surfaced on a ticket summary.
#[derive(Debug, Clone)]
pub struct TicketCover {
    /// Representative post ID.
    pub post_id: String,
    /// Cover image location.
    pub image_url: String,
    /// Cover artwork title.
    pub title: String,
    /// Credited artist.
    pub artist_name: Option<String>,
}

/// A ticket decorated with aggregates for the gallery listing.
#[derive(Debug, Clone)]
pub struct TicketSummary {
    /// The ticket itself.
    pub exhibition: exhibition::Model,
    /// Number of posts attached to the ticket.
    pub post_count: u64,
    /// Mean rating over attached posts, `None` when there are none.
    pub avg_rating: Option<f64>,
    /// Representative post fields, when a cover exists.
    pub cover: Option<TicketCover>,
}

/// Service for managing exhibition tickets.
#[derive(Clone)]
pub struct ExhibitionService {
    exhibition_repo: ExhibitionRepository,
    post_repo: PostRepository,
    id_gen: IdGenerator,
    colors: TicketColor,
}

impl ExhibitionService {
    /// Create a new exhibition service.
    #[must_use]
    pub const fn new(exhibition_repo: ExhibitionRepository, post_repo: PostRepository) -> Self {
        Self {
            exhibition_repo,
            post_repo,
            id_gen: IdGenerator::new(),
            colors: TicketColor::new(),
        }
    }

    /// Find the ticket for a grouping key, creating it if absent.
    ///
    /// The visit date is normalized before lookup so `2025-01-01` and
    /// `2025/01/01` resolve to the same ticket as `2025.01.01`. On a
    /// miss a fresh ticket is inserted with a random background color.
    ///
    /// Two concurrent misses on the same key can each insert a ticket;
    /// the grouping key carries no unique constraint.
    pub async fn resolve_or_create(
        &self,
        user_id: &str,
        name: &str,
        visit_date: &str,
        location: Option<String>,
    ) -> AppResult<exhibition::Model> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation(
                "Exhibition name must not be empty".to_string(),
            ));
        }

        let visit_date = normalize_visit_date(visit_date);

        if let Some(existing) = self
            .exhibition_repo
            .find_by_key(user_id, name, &visit_date)
            .await?
        {
            debug!(exhibition_id = %existing.id, "Resolved existing ticket");
            return Ok(existing);
        }

        let record = NewExhibitionRecord {
            id: self.id_gen.generate(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            visit_date,
            location,
            bg_color: self.colors.random(),
        };

        let created = self.exhibition_repo.create(record).await?;
        debug!(exhibition_id = %created.id, "Created new ticket");
        Ok(created)
    }

    /// Set the representative post if the ticket has none yet.
    ///
    /// Returns `true` when this call assigned the cover.
    pub async fn assign_representative(
        &self,
        exhibition_id: &str,
        post_id: &str,
    ) -> AppResult<bool> {
        self.exhibition_repo
            .assign_representative_if_unset(exhibition_id, post_id)
            .await
    }

    /// Apply a partial metadata update to a ticket.
    ///
    /// Only the owner may edit. Absent fields keep their stored value.
    /// A white background color is substituted with the fallback, the
    /// same safeguard applied at creation. The representative post is
    /// not checked for ticket membership.
    pub async fn update(
        &self,
        exhibition_id: &str,
        user_id: &str,
        update: ExhibitionUpdate,
    ) -> AppResult<exhibition::Model> {
        let exhibition = self
            .exhibition_repo
            .find_by_id(exhibition_id)
            .await?
            .ok_or_else(|| AppError::ExhibitionNotFound(exhibition_id.to_string()))?;

        if exhibition.user_id != user_id {
            return Err(AppError::Forbidden(
                "Not the exhibition owner".to_string(),
            ));
        }

        let changes = ExhibitionChanges {
            review: update.review,
            bg_color: update.bg_color.map(TicketColor::ensure_visible),
            representative_post_id: update.representative_post_id,
            director: update.director,
            cast_members: update.cast_members,
            visit_time: update.visit_time,
        };

        self.exhibition_repo.update(exhibition_id, changes).await
    }

    /// List a user's tickets, most recent visit first, decorated with
    /// post count, mean rating, and the representative post's fields.
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<TicketSummary>> {
        let exhibitions = self.exhibition_repo.find_by_user(user_id).await?;

        let mut summaries = Vec::with_capacity(exhibitions.len());
        for exhibition in exhibitions {
            let post_count = self.post_repo.count_by_exhibition(&exhibition.id).await?;
            let avg_rating = self.post_repo.average_rating(&exhibition.id).await?;

            let cover = match &exhibition.representative_post_id {
                Some(post_id) => {
                    self.post_repo
                        .find_by_id(post_id)
                        .await?
                        .map(|p| TicketCover {
                            post_id: p.id,
                            image_url: p.image_url,
                            title: p.title,
                            artist_name: p.artist_name,
                        })
                }
                None => None,
            };

            summaries.push(TicketSummary {
                exhibition,
                post_count,
                avg_rating,
                cover,
            });
        }

        Ok(summaries)
    }

    /// Get a ticket with its member posts, newest post first.
    pub async fn get_with_posts(
        &self,
        exhibition_id: &str,
    ) -> AppResult<(exhibition::Model, Vec<post::Model>)> {
        let exhibition = self
            .exhibition_repo
            .find_by_id(exhibition_id)
            .await?
            .ok_or_else(|| AppError::ExhibitionNotFound(exhibition_id.to_string()))?;

        let posts = self.post_repo.find_by_exhibition(exhibition_id).await?;

        Ok((exhibition, posts))
    }
}
