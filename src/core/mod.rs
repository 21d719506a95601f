// Core: 경로 탐색과 파일 형식 테이블
pub mod formats;
pub mod navigator;
