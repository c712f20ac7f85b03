use super::*;
use crate::server::{
    model::{athlete::AthleteProfile, identity::Identity},
    service::{
        athlete::{AthleteService, Registration},
        relationship::RelationshipService,
    },
};

mod register;
