use registrar::{
  instruction::{Lookup, LookupKey, LookupParams, Submit},
  schema::{Coauthor, Node},
};

use super::*;

mod lookup;
mod submit;
