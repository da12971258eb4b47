mod vm_test;
