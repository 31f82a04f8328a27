mod request_dto;

pub use request_dto::{
    CreateRequestDto, ModifyRequestDto, RequestResponseDto, MAX_FILE_SIZE,
};
