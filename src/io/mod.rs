/*!
# IO utilities

Reading of corpus trees and bitext files, and writing of aligned tables.
!*/
pub mod reader;
pub mod writer;
