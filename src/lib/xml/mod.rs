// SPDX-License-Identifier: Apache-2.0

mod reader;
mod writer;

pub(crate) use self::reader::data_node_from_xml;
pub(crate) use self::writer::data_node_to_xml;
