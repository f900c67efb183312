pub mod article;
pub mod camp;
pub mod camp_interest_email;
pub mod camp_participation;
pub mod form;
pub mod form_question;
pub mod form_question_answer;
pub mod resource_year_permission;
pub mod role;
pub mod role_permission;
pub mod solution;
pub mod user;
pub mod user_profile;
pub mod workshop;
pub mod workshop_lecturer;
pub mod workshop_participant;
