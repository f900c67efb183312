use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One yearly edition of the camp. The year number doubles as the key.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "camp")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub year: i32,

    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    /// Deadline for new workshop proposals.
    pub proposal_end_date: Option<Date>,
    /// Once set, the workshop lineup is frozen: proposals can no longer be
    /// accepted or rejected and qualification results are locked.
    pub program_finalized: bool,

    /// Designated registration-form questions, resolved by id at read time.
    /// A dangling or missing reference is tolerated (birth date stays
    /// unresolved).
    pub form_question_birth_date_id: Option<i32>,
    pub form_question_arrival_date_id: Option<i32>,
    pub form_question_departure_date_id: Option<i32>,

    #[sea_orm(has_many)]
    pub participants: HasMany<super::camp_participation::Entity>,

    #[sea_orm(has_many)]
    pub workshops: HasMany<super::workshop::Entity>,

    #[sea_orm(has_many)]
    pub interested_via_email: HasMany<super::camp_interest_email::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether participants can still register and withdraw, and lecturers
    /// can still enter results. Closes when the edition starts or the
    /// program is finalized and the edition is over.
    pub fn is_qualification_editable(&self, today: Date) -> bool {
        match self.start_date {
            Some(start) => today < start,
            None => !self.program_finalized,
        }
    }

    /// Whether new workshop proposals are still accepted.
    pub fn are_proposals_open(&self, today: Date) -> bool {
        if self.program_finalized {
            return false;
        }
        match self.proposal_end_date {
            Some(deadline) => today <= deadline,
            None => true,
        }
    }

    /// Whether the edition has started by the given date. Editions without a
    /// start date never count as started.
    pub fn has_started(&self, today: Date) -> bool {
        self.start_date.is_some_and(|start| start <= today)
    }
}
