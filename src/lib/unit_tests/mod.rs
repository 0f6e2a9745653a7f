// SPDX-License-Identifier: Apache-2.0


mod merge;
mod option;
mod ordered;
mod ordering;
mod restconf;
mod xml;
