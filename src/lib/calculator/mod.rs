// SPDX-License-Identifier: Apache-2.0

mod base;
mod gnmi;
mod json;
mod netconf;
mod restconf;

pub use self::base::{BaseCalculator, NodeMatch};
pub use self::gnmi::{
    GnmiCalculator, GnmiPath, GnmiPathElem, GnmiSetRequest, GnmiTypedValue,
    GnmiUpdate,
};
pub use self::netconf::NetconfCalculator;
pub use self::restconf::{RestconfCalculator, RestconfMethod, RestconfRequest};

pub(crate) use self::json::JsonEncoder;
